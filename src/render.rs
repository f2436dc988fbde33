//! Terminal presentation of both boards. Pure functions only: nothing here
//! prints, and the turn machine never calls into this module.

use alloc::string::String;
use core::fmt::{self, Write};

use crate::board::{Board, CellState, ShadowBoard, ShadowCell};
use crate::codec::Coordinate;

const CSI: &str = "\x1b[";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn fg_code(self) -> u8 {
        30 + self.offset()
    }

    fn bg_code(self) -> u8 {
        40 + self.offset()
    }

    fn offset(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
        }
    }
}

/// How one cell is drawn. `symbol` is readable on its own; colours only
/// decorate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub fg: Option<Color>,
    pub bg: Color,
}

impl Glyph {
    const fn new(symbol: char, fg: Option<Color>, bg: Color) -> Self {
        Self { symbol, fg, bg }
    }

    /// Write the glyph, with ANSI colours when `color` is set.
    pub fn write_to<W: Write>(&self, out: &mut W, color: bool) -> fmt::Result {
        if !color {
            return out.write_char(self.symbol);
        }
        write!(out, "{}{}m", CSI, self.bg.bg_code())?;
        if let Some(fg) = self.fg {
            write!(out, "{}{}m", CSI, fg.fg_code())?;
        }
        write!(out, "{}{}", self.symbol, RESET)
    }
}

pub fn glyph(cell: CellState) -> Glyph {
    match cell {
        CellState::Empty => Glyph::new('.', None, Color::Black),
        CellState::Ship => Glyph::new('S', Some(Color::Black), Color::Green),
        CellState::Hit => Glyph::new('X', Some(Color::Red), Color::Green),
        CellState::Miss => Glyph::new('o', Some(Color::Black), Color::Yellow),
        CellState::Sunk => Glyph::new('#', Some(Color::Red), Color::Blue),
    }
}

pub fn shadow_glyph(cell: ShadowCell) -> Glyph {
    match cell {
        ShadowCell::Unknown => Glyph::new('.', None, Color::Black),
        ShadowCell::Hit => Glyph::new('X', Some(Color::Black), Color::Red),
        ShadowCell::Miss => Glyph::new('o', Some(Color::Black), Color::Yellow),
    }
}

fn header(size: u8) -> String {
    let mut s = String::from(" |");
    for x in 0..size {
        s.push((b'A' + x) as char);
        s.push('|');
    }
    s.push(' ');
    s
}

/// Our board on the left, what we know of the opponent on the right.
pub fn render_boards(board: &Board, shadow: &ShadowBoard, color: bool) -> String {
    let size = board.size().min(shadow.size());
    let mut out = String::new();
    let head = header(size);
    let pad = " ".repeat(head.len().saturating_sub(10));
    // Writing into a String cannot fail.
    let _ = write_boards(&mut out, board, shadow, size, &head, &pad, color);
    out
}

fn write_boards(
    out: &mut String,
    board: &Board,
    shadow: &ShadowBoard,
    size: u8,
    head: &str,
    pad: &str,
    color: bool,
) -> fmt::Result {
    writeln!(out, "Your Board{}    Enemy Board", pad)?;
    writeln!(out, "{}    {}", head, head)?;
    for y in 0..size {
        write!(out, "{}|", y)?;
        for x in 0..size {
            let Ok(c) = Coordinate::new(x, y) else { continue };
            glyph(board.cell(c)).write_to(out, color)?;
            out.write_char('|')?;
        }
        write!(out, "{}    {}|", y, y)?;
        for x in 0..size {
            let Ok(c) = Coordinate::new(x, y) else { continue };
            shadow_glyph(shadow.cell(c)).write_to(out, color)?;
            out.write_char('|')?;
        }
        writeln!(out, "{}", y)?;
    }
    writeln!(out, "{}    {}", head, head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::{Orientation, Ship, ShipClass};

    #[test]
    fn every_cell_state_has_a_distinct_symbol() {
        let states = [
            CellState::Empty,
            CellState::Ship,
            CellState::Hit,
            CellState::Miss,
            CellState::Sunk,
        ];
        let mut symbols: alloc::vec::Vec<char> = states.iter().map(|s| glyph(*s).symbol).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), states.len());
    }

    #[test]
    fn plain_rendering_shows_ships_and_shots() {
        let mut board = Board::with_size(3).unwrap();
        let origin = Coordinate::new(0, 0).unwrap();
        board
            .place(Ship::new(ShipClass::new("Patrol", 2), origin, Orientation::Horizontal).unwrap())
            .unwrap();
        board.receive_shot(origin).unwrap();
        board.receive_shot(Coordinate::new(2, 2).unwrap()).unwrap();
        let mut shadow = ShadowBoard::with_size(3).unwrap();
        shadow.record(Coordinate::new(1, 1).unwrap(), true).unwrap();

        let text = render_boards(&board, &shadow, false);
        let lines: alloc::vec::Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], " |A|B|C|      |A|B|C| ");
        assert_eq!(lines[2], "0|X|S|.|0    0|.|.|.|0");
        assert_eq!(lines[3], "1|.|.|.|1    1|.|X|.|1");
        assert_eq!(lines[4], "2|.|.|o|2    2|.|.|.|2");
    }

    #[test]
    fn colored_glyph_wraps_symbol_in_escape_codes() {
        let mut s = String::new();
        glyph(CellState::Hit).write_to(&mut s, true).unwrap();
        assert_eq!(s, "\x1b[42m\x1b[31mX\x1b[0m");
    }
}
