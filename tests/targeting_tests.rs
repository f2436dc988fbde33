use broadside::targeting::{calc_density, choose_target, sample};
use broadside::{Coordinate, ShadowBoard};
use rand::{rngs::SmallRng, SeedableRng};

fn c(x: u8, y: u8) -> Coordinate {
    Coordinate::new(x, y).unwrap()
}

#[test]
fn open_board_favours_the_centre() {
    let shadow = ShadowBoard::new();
    let d = calc_density(&shadow, &[5, 4, 3, 3, 2]);
    assert!(d[4][4] > d[0][0]);
    assert_eq!(d[0][0], d[9][9]);
    assert_eq!(d[2][7], d[7][2]);
}

#[test]
fn misses_and_known_hits_get_no_weight() {
    let mut shadow = ShadowBoard::new();
    shadow.record(c(3, 3), false).unwrap();
    shadow.record(c(6, 6), true).unwrap();
    let d = calc_density(&shadow, &[3, 2]);
    assert_eq!(d[3][3], 0.0);
    assert_eq!(d[6][6], 0.0);
}

#[test]
fn cells_next_to_a_hit_dominate() {
    let mut shadow = ShadowBoard::new();
    shadow.record(c(5, 5), true).unwrap();
    let d = calc_density(&shadow, &[2]);
    assert!(d[5][4] > d[0][4] * 4.0);
    assert!(d[4][5] > d[9][9] * 4.0);
}

#[test]
fn sampled_targets_are_never_repeated() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut shadow = ShadowBoard::with_size(6).unwrap();
    for _ in 0..36 {
        let target = choose_target(&shadow, &[3, 2], &mut rng).unwrap();
        assert!(shadow.contains(target));
        assert!(!shadow.is_targeted(target));
        shadow.record(target, false).unwrap();
    }
    assert_eq!(choose_target(&shadow, &[3, 2], &mut rng), None);
}

#[test]
fn empty_density_falls_back_to_first_open_cell() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut shadow = ShadowBoard::new();
    shadow.record(c(0, 0), false).unwrap();
    let zero = [[0.0; 10]; 10];
    assert_eq!(sample(&shadow, &zero, 0.5, &mut rng), Some(c(1, 0)));
}
