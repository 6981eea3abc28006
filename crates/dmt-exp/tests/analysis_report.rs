use std::collections::{BTreeMap, HashMap};

use dmt_exp::{
    analyze, stable_hash_string, to_canonical_json_bytes, write_csv, write_json, AnalysisConfig,
    CancelToken,
};
use serde_json::json;

fn small_config(seed: u64) -> AnalysisConfig {
    let mut config = AnalysisConfig::default();
    config.seed = seed;
    config.system.nt = 2;
    config.system.nr = 2;
    config.system.streams = 1;
    config.solver.iterations = 30;
    config.analysis.trials = 40;
    config.analysis.min_snr_db = -10.0;
    config.analysis.max_snr_db = 20.0;
    config.analysis.snr_step_db = 5.0;
    config.analysis.thresholds = vec![2.5, 50.0];
    config.analysis.histogram_bins = 8;
    config.runtime.threads = 2;
    config
}

#[test]
fn report_covers_the_configured_grids() {
    let report = analyze(&small_config(1), &CancelToken::new()).unwrap();
    assert_eq!(report.outage.len(), 7);
    assert_eq!(report.capacity.len(), 7);
    assert_eq!(report.min_snr.count, 40);
    assert_eq!(report.min_snr.histogram.counts.iter().sum::<u64>(), 40);
    for pair in report.outage.windows(2) {
        assert!(pair[1].probability >= pair[0].probability);
    }
    for pair in report.capacity.windows(2) {
        assert!(pair[1].mean_capacity >= pair[0].mean_capacity);
    }
    assert_eq!(report.threshold_marks.len(), 2);
    assert!(report.threshold_marks[0].probability.is_some());
    assert_eq!(report.threshold_marks[1].probability, None);
    assert_eq!(report.provenance.seed, 1);
}

#[test]
fn report_hash_is_reproducible() {
    let first = analyze(&small_config(3), &CancelToken::new()).unwrap();
    let again = analyze(&small_config(3), &CancelToken::new()).unwrap();
    let other = analyze(&small_config(4), &CancelToken::new()).unwrap();
    assert_eq!(first.analysis_hash.len(), 64);
    assert!(first.verify_hash().unwrap());
    assert_eq!(first.analysis_hash, again.analysis_hash);
    assert_eq!(
        to_canonical_json_bytes(&first).unwrap(),
        to_canonical_json_bytes(&again).unwrap()
    );
    assert_ne!(first.analysis_hash, other.analysis_hash);

    let mut tampered = first.clone();
    tampered.outage[0].probability += 0.5;
    assert!(!tampered.verify_hash().unwrap());
}

#[test]
fn thread_count_does_not_change_the_hash() {
    let mut serial = small_config(8);
    serial.runtime.threads = 1;
    let mut parallel = small_config(8);
    parallel.runtime.threads = 3;
    let a = analyze(&serial, &CancelToken::new()).unwrap();
    let b = analyze(&parallel, &CancelToken::new()).unwrap();
    assert_eq!(a.outage, b.outage);
    assert_eq!(a.capacity, b.capacity);
}

#[test]
fn cancelled_analysis_is_an_error() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let err = analyze(&small_config(1), &cancel).unwrap_err();
    assert_eq!(err.code(), "cancelled");
}

#[test]
fn invalid_config_is_rejected_before_running() {
    let mut config = small_config(1);
    config.analysis.min_snr_db = 40.0;
    assert_eq!(analyze(&config, &CancelToken::new()).unwrap_err().code(), "threshold-range");
}

#[test]
fn artefacts_are_written_as_json_and_csv() {
    let report = analyze(&small_config(2), &CancelToken::new()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("nested/report.json");
    write_json(&json_path, &report).unwrap();
    let text = std::fs::read_to_string(&json_path).unwrap();
    assert!(text.contains("\"analysis_hash\""));

    let csv_path = dir.path().join("outage.csv");
    write_csv(&csv_path, &report.outage).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("threshold_db,probability"));
    assert_eq!(lines.count(), 7);
}

#[test]
fn canonical_bytes_sort_keys_at_every_depth() {
    let value = json!({"b": 1, "a": {"d": [2, {"z": 0, "y": 1}], "c": null}});
    let bytes = to_canonical_json_bytes(&value).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"a":{"c":null,"d":[2,{"y":1,"z":0}]},"b":1}"#
    );

    let hashed: HashMap<&str, u32> = [("streams", 2), ("nt", 4), ("nr", 4)].into_iter().collect();
    let ordered: BTreeMap<&str, u32> = hashed.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(
        stable_hash_string(&hashed).unwrap(),
        stable_hash_string(&ordered).unwrap()
    );
}
