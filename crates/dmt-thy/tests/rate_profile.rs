use dmt_thy::achievable_rate_profile;

#[test]
fn rates_split_power_over_strongest_modes() {
    let profile = achievable_rate_profile(&[2.0, 1.0], 2.0, 1.0, 2, 2).unwrap();
    assert_eq!(profile.len(), 3);
    assert_eq!(profile[0].rate, 0.0);
    assert_eq!(profile[0].diversity, 4.0);
    assert!((profile[1].rate - 9f64.log2()).abs() < 1e-12);
    assert_eq!(profile[1].diversity, 1.0);
    assert!((profile[2].rate - (5f64.log2() + 1.0)).abs() < 1e-12);
    assert_eq!(profile[2].diversity, 0.0);
    assert_eq!(profile[2].multiplexing, 2);
}

#[test]
fn extra_singular_values_are_ignored() {
    let profile = achievable_rate_profile(&[3.0, 2.0, 1.0], 1.0, 0.5, 2, 4).unwrap();
    assert_eq!(profile.len(), 3);
}

#[test]
fn profile_rejects_short_or_invalid_input() {
    let err = achievable_rate_profile(&[1.0], 1.0, 1.0, 2, 2).unwrap_err();
    assert_eq!(err.code(), "length-mismatch");
    let err = achievable_rate_profile(&[1.0, 1.0], -1.0, 1.0, 2, 2).unwrap_err();
    assert_eq!(err.code(), "invalid-budget");
}

#[test]
fn profile_serializes_as_plain_records() {
    let profile = achievable_rate_profile(&[1.0], 1.0, 1.0, 1, 1).unwrap();
    let json = serde_json::to_string(&profile[1]).unwrap();
    assert_eq!(json, r#"{"multiplexing":1,"diversity":0.0,"rate":1.0}"#);
}
