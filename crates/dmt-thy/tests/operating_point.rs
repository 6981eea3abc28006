use dmt_thy::{multiplexing_for_error_probability, multiplexing_for_rate};

#[test]
fn rate_solve_round_trips_inside_the_range() {
    let snr = 15.0;
    let point = multiplexing_for_rate(6.0, snr, 4, 4).unwrap();
    assert!(point.achievable);
    assert!((point.multiplexing - 1.5).abs() < 1e-12);
    let rate = point.multiplexing * (1.0 + snr).log2();
    assert!((rate - 6.0).abs() < 1e-9);
    assert!((point.diversity - 2.5 * 2.5).abs() < 1e-12);
}

#[test]
fn unreachable_rate_is_clamped_to_full_multiplexing() {
    let point = multiplexing_for_rate(100.0, 15.0, 2, 3).unwrap();
    assert!(!point.achievable);
    assert_eq!(point.multiplexing, 2.0);
    assert_eq!(point.diversity, 0.0);
}

#[test]
fn rate_solve_falls_back_without_usable_snr() {
    let point = multiplexing_for_rate(2.0, 0.0, 2, 2).unwrap();
    assert!(!point.achievable);
    assert_eq!(point.multiplexing, 0.0);
    assert_eq!(point.diversity, 4.0);
}

#[test]
fn error_probability_solve_takes_the_smaller_root() {
    // d = ln(1e4) / ln(100) = 2, so (4 - r)^2 = 2.
    let point = multiplexing_for_error_probability(1e-4, 100.0, 4, 4).unwrap();
    assert!(point.achievable);
    assert!((point.multiplexing - (4.0 - 2f64.sqrt())).abs() < 1e-9);
    assert!((point.diversity - 2.0).abs() < 1e-9);

    let point = multiplexing_for_error_probability(1e-2, 10.0, 2, 4).unwrap();
    assert!((point.multiplexing - (3.0 - 3f64.sqrt())).abs() < 1e-9);
    assert!((point.diversity - 2.0).abs() < 1e-9);
}

#[test]
fn error_probability_solve_falls_back_to_zero() {
    // Required diversity 40 exceeds the 16 a 4x4 link offers.
    let too_reliable = multiplexing_for_error_probability(1e-40, 10.0, 4, 4).unwrap();
    assert!(!too_reliable.achievable);
    assert_eq!(too_reliable.multiplexing, 0.0);

    for (pe, snr) in [(0.0, 10.0), (1.0, 10.0), (0.1, 1.0), (0.1, 0.5)] {
        let point = multiplexing_for_error_probability(pe, snr, 2, 2).unwrap();
        assert!(!point.achievable);
        assert_eq!(point.multiplexing, 0.0);
    }
}

#[test]
fn zero_antennas_are_rejected() {
    assert!(multiplexing_for_rate(1.0, 10.0, 0, 2).is_err());
    assert!(multiplexing_for_error_probability(0.1, 10.0, 2, 0).is_err());
}
