use broadside::{
    BitBoardError, Board, BoardError, CellState, Coordinate, FleetPreset, Orientation,
    ShadowBoard, ShadowCell, Ship, ShipClass, ShipId, ShotOutcome,
};
use rand::{rngs::SmallRng, SeedableRng};

fn c(x: u8, y: u8) -> Coordinate {
    Coordinate::new(x, y).unwrap()
}

fn cruiser_at(x: u8, y: u8, o: Orientation) -> Ship {
    Ship::new(ShipClass::new("Cruiser", 3), c(x, y), o).unwrap()
}

#[test]
fn three_hits_sink_a_three_cell_ship() {
    let mut board = Board::new();
    board.place(cruiser_at(2, 2, Orientation::Vertical)).unwrap();

    assert_eq!(board.receive_shot(c(2, 2)).unwrap(), ShotOutcome::Hit);
    assert_eq!(board.receive_shot(c(2, 3)).unwrap(), ShotOutcome::Hit);
    assert!(!board.is_fleet_destroyed());
    assert_eq!(board.receive_shot(c(2, 4)).unwrap(), ShotOutcome::Sunk);
    assert!(board.is_fleet_destroyed());
    assert_eq!(board.cell(c(2, 3)), CellState::Sunk);
}

#[test]
fn repeated_shot_is_already_taken() {
    let mut board = Board::new();
    board.place(cruiser_at(5, 5, Orientation::Horizontal)).unwrap();

    assert_eq!(board.receive_shot(c(0, 0)).unwrap(), ShotOutcome::Miss);
    let before = board.clone();
    assert_eq!(board.receive_shot(c(0, 0)).unwrap(), ShotOutcome::AlreadyTaken);
    assert_eq!(board, before);

    board.receive_shot(c(5, 5)).unwrap();
    assert_eq!(board.receive_shot(c(5, 5)).unwrap(), ShotOutcome::AlreadyTaken);
    assert_eq!(board.ships()[0].remaining_hits(), 2);
}

#[test]
fn overlapping_ship_is_rejected_without_change() {
    let mut board = Board::new();
    assert_eq!(board.place(cruiser_at(1, 1, Orientation::Horizontal)).unwrap(), ShipId(0));
    let before = board.clone();
    let err = board.place(cruiser_at(2, 0, Orientation::Vertical)).unwrap_err();
    assert_eq!(err, BoardError::Overlap { x: 2, y: 1 });
    assert_eq!(board, before);
}

#[test]
fn ship_off_the_grid_is_rejected() {
    let mut board = Board::with_size(5).unwrap();
    let err = board.place(cruiser_at(3, 0, Orientation::Horizontal)).unwrap_err();
    assert_eq!(err, BoardError::OutOfBounds { x: 5, y: 0 });
    assert!(board.ships().is_empty());

    let err = Ship::new(ShipClass::new("Long", 4), c(14, 0), Orientation::Horizontal).unwrap_err();
    assert_eq!(err, BoardError::OutOfBounds { x: 16, y: 0 });
}

#[test]
fn shots_outside_the_grid_are_errors() {
    let mut board = Board::with_size(6).unwrap();
    assert_eq!(
        board.receive_shot(c(6, 0)),
        Err(BoardError::OutOfBounds { x: 6, y: 0 })
    );
    assert_eq!(board.cell(c(12, 12)), CellState::Empty);
}

#[test]
fn grid_size_is_limited() {
    assert!(Board::with_size(10).is_ok());
    assert_eq!(Board::with_size(11).unwrap_err(), BoardError::GridTooLarge { size: 11 });
    assert_eq!(Board::with_size(0).unwrap_err(), BoardError::GridTooLarge { size: 0 });
}

#[test]
fn ship_between_end_cells() {
    let class = ShipClass::new("Battleship", 4);
    let ship = Ship::between(class, c(3, 7), c(0, 7)).unwrap();
    assert_eq!(ship.cells(), &[c(0, 7), c(1, 7), c(2, 7), c(3, 7)]);

    let ship = Ship::between(class, c(4, 2), c(4, 5)).unwrap();
    assert_eq!(ship.cells()[0], c(4, 2));
    assert_eq!(ship.cells()[3], c(4, 5));

    assert_eq!(Ship::between(class, c(0, 0), c(3, 3)).unwrap_err(), BoardError::Diagonal);
    assert_eq!(
        Ship::between(class, c(0, 0), c(0, 2)).unwrap_err(),
        BoardError::WrongLength {
            expected: 4,
            actual: 3
        }
    );
}

#[test]
fn cell_states_follow_the_shots() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipClass::new("Destroyer", 2), c(0, 0), Orientation::Horizontal).unwrap())
        .unwrap();
    assert_eq!(board.cell(c(0, 0)), CellState::Ship);
    assert_eq!(board.cell(c(5, 5)), CellState::Empty);

    board.receive_shot(c(0, 0)).unwrap();
    board.receive_shot(c(5, 5)).unwrap();
    assert_eq!(board.cell(c(0, 0)), CellState::Hit);
    assert_eq!(board.cell(c(5, 5)), CellState::Miss);
    assert_eq!(board.ship_at(c(1, 0)).map(|(id, _)| id), Some(ShipId(0)));
}

#[test]
fn random_fleet_fits_the_board() {
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board
            .place_fleet_randomly(&mut rng, FleetPreset::Standard.classes())
            .unwrap();
        assert_eq!(board.ships().len(), 5);
        assert_eq!(board.fleet_cells(), FleetPreset::Standard.total_cells());
    }
}

#[test]
fn random_placement_fails_when_ship_cannot_fit() {
    let mut rng = SmallRng::seed_from_u64(7);
    let board = Board::with_size(3).unwrap();
    assert_eq!(
        board.random_placement(&mut rng, ShipClass::new("Carrier", 5)).unwrap_err(),
        BoardError::NoPlacement
    );
}

#[test]
fn shadow_board_records_each_cell_once() {
    let mut shadow = ShadowBoard::new();
    assert_eq!(shadow.cell(c(1, 2)), ShadowCell::Unknown);
    shadow.record(c(1, 2), true).unwrap();
    shadow.record(c(3, 3), false).unwrap();
    assert_eq!(shadow.cell(c(1, 2)), ShadowCell::Hit);
    assert_eq!(shadow.cell(c(3, 3)), ShadowCell::Miss);
    assert_eq!((shadow.hit_count(), shadow.miss_count()), (1, 1));

    assert_eq!(
        shadow.record(c(1, 2), false),
        Err(BoardError::DuplicateTarget { x: 1, y: 2 })
    );
    assert_eq!(
        shadow.record(c(10, 0), true),
        Err(BoardError::OutOfBounds { x: 10, y: 0 })
    );
    assert_eq!(shadow.untargeted().count(), 98);
    assert_eq!(shadow.untargeted().next(), Some(c(0, 0)));
}

#[test]
fn bitboard_errors_map_to_grid_errors() {
    assert_eq!(
        BoardError::from(BitBoardError::IndexOutOfBounds { x: 3, y: 12 }),
        BoardError::OutOfBounds { x: 3, y: 12 }
    );
    assert_eq!(
        BoardError::from(BitBoardError::SizeTooLarge { n: 300, capacity: 128 }),
        BoardError::GridTooLarge { size: u8::MAX }
    );
}

#[test]
fn debug_output_has_no_trailing_newline() {
    let mut board = Board::new();
    board.place(cruiser_at(0, 0, Orientation::Horizontal)).unwrap();
    let text = format!("{:?}", board);
    assert!(text.starts_with("Board {"));
    assert!(text.ends_with('}'));
}
