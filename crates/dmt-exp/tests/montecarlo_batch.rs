use std::time::Duration;

use dmt_core::derive_substream_seed;
use dmt_exp::{run_monte_carlo, run_trial, CancelToken, SystemParams};
use dmt_svd::PowerOpts;

fn params() -> SystemParams {
    SystemParams {
        nt: 3,
        nr: 3,
        streams: 2,
        ..SystemParams::default()
    }
}

#[test]
fn outcomes_do_not_depend_on_thread_count() {
    let opts = PowerOpts::fixed(30);
    let cancel = CancelToken::new();
    let serial = run_monte_carlo(&params(), &opts, 24, 77, &cancel, 1).unwrap();
    let parallel = run_monte_carlo(&params(), &opts, 24, 77, &cancel, 4).unwrap();
    assert_eq!(serial.len(), 24);
    assert_eq!(serial, parallel);
}

#[test]
fn trial_i_uses_substream_i() {
    let opts = PowerOpts::fixed(30);
    let batch = run_monte_carlo(&params(), &opts, 5, 123, &CancelToken::new(), 2).unwrap();
    for (idx, outcome) in batch.iter().enumerate() {
        let single = run_trial(&params(), &opts, derive_substream_seed(123, idx as u64)).unwrap();
        assert_eq!(*outcome, single);
        assert!(outcome.min_snr_db.is_finite());
        assert!(outcome.capacity >= 0.0);
    }
}

#[test]
fn cancelled_batch_reports_progress() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let err = run_monte_carlo(&params(), &PowerOpts::default(), 10, 1, &cancel, 2).unwrap_err();
    assert_eq!(err.code(), "cancelled");
    assert_eq!(err.info().context.get("completed").map(String::as_str), Some("0"));
    assert_eq!(err.info().context.get("trials").map(String::as_str), Some("10"));
}

#[test]
fn expired_deadline_cancels() {
    let cancel = CancelToken::with_timeout(Duration::ZERO);
    assert!(cancel.is_cancelled());
    let err = run_monte_carlo(&params(), &PowerOpts::default(), 4, 1, &cancel, 1).unwrap_err();
    assert_eq!(err.code(), "cancelled");
}

#[test]
fn clones_share_the_flag() {
    let cancel = CancelToken::new();
    let handle = cancel.clone();
    assert!(!cancel.is_cancelled());
    handle.cancel();
    assert!(cancel.is_cancelled());
    assert!(cancel.flag().load(std::sync::atomic::Ordering::SeqCst));
}

#[test]
fn invalid_parameters_fail_before_running() {
    let mut bad = params();
    bad.streams = 4;
    let err = run_monte_carlo(&bad, &PowerOpts::default(), 3, 1, &CancelToken::new(), 1).unwrap_err();
    assert_eq!(err.code(), "stream-count");
}

#[test]
fn empty_batch_is_empty() {
    let out = run_monte_carlo(&params(), &PowerOpts::default(), 0, 1, &CancelToken::new(), 1).unwrap();
    assert!(out.is_empty());
}
