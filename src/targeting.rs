// Probability-based target selection against the shadow board.
// no_std, no heap allocation.

use rand::Rng;

use crate::board::ShadowBoard;
use crate::codec::Coordinate;
use crate::config::MAX_GRID_SIZE;
use crate::ship::Orientation;

const GRID: usize = MAX_GRID_SIZE as usize;

/// Relative likelihood of a ship segment per cell, indexed `[y][x]`.
pub type Density = [[f64; GRID]; GRID];

/// Placements covering more confirmed hits get exponentially more weight so
/// cells next to a hit stand out.
const HIT_BIAS: f64 = 10.0;

/// Lower temperature concentrates sampling on the densest cells.
const TEMPERATURE: f64 = 0.5;

/// Sum, for every untargeted cell, the weight of every placement of every
/// fleet length that avoids known misses. The opponent never tells us which
/// ships are sunk, so all lengths stay in play for the whole match.
pub fn calc_density(shadow: &ShadowBoard, lengths: &[usize]) -> Density {
    let size = shadow.size() as usize;
    let mut matrix = [[0.0f64; GRID]; GRID];
    let hits = shadow.hits();
    let misses = shadow.misses();

    for &len in lengths {
        if len == 0 || len > size {
            continue;
        }
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            let (max_x, max_y) = match orient {
                Orientation::Horizontal => (size - len + 1, size),
                Orientation::Vertical => (size, size - len + 1),
            };
            for y in 0..max_y {
                for x in 0..max_x {
                    let cell = |k: usize| match orient {
                        Orientation::Horizontal => (x + k, y),
                        Orientation::Vertical => (x, y + k),
                    };
                    let mut valid = true;
                    let mut n_hits = 0i32;
                    for k in 0..len {
                        let (cx, cy) = cell(k);
                        if misses.get(cx, cy).unwrap_or(true) {
                            valid = false;
                            break;
                        }
                        if hits.get(cx, cy).unwrap_or(false) {
                            n_hits += 1;
                        }
                    }
                    if !valid {
                        continue;
                    }
                    let weight = libm::pow(HIT_BIAS, n_hits as f64);
                    for k in 0..len {
                        let (cx, cy) = cell(k);
                        if !hits.get(cx, cy).unwrap_or(true) {
                            matrix[cy][cx] += weight;
                        }
                    }
                }
            }
        }
    }
    matrix
}

/// Sample an untargeted cell in proportion to `density`. Falls back to the
/// first untargeted cell, and returns `None` once every cell was fired at.
pub fn sample<R: Rng>(
    shadow: &ShadowBoard,
    density: &Density,
    temperature: f64,
    rng: &mut R,
) -> Option<Coordinate> {
    let size = shadow.size() as usize;
    let mut adjusted = [[0.0f64; GRID]; GRID];
    let mut total = 0.0;
    for y in 0..size {
        for x in 0..size {
            let v = libm::pow(density[y][x], 1.0 / temperature);
            adjusted[y][x] = v;
            total += v;
        }
    }
    if total > 0.0 {
        let threshold: f64 = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for y in 0..size {
            for x in 0..size {
                cumulative += adjusted[y][x];
                if threshold < cumulative && adjusted[y][x] > 0.0 {
                    if let Ok(c) = Coordinate::new(x as u8, y as u8) {
                        if !shadow.is_targeted(c) {
                            return Some(c);
                        }
                    }
                }
            }
        }
    }
    shadow.untargeted().next()
}

/// Density plus sampling in one call.
pub fn choose_target<R: Rng>(
    shadow: &ShadowBoard,
    lengths: &[usize],
    rng: &mut R,
) -> Option<Coordinate> {
    let density = calc_density(shadow, lengths);
    sample(shadow, &density, TEMPERATURE, rng)
}
