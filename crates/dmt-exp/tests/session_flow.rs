use std::collections::BTreeSet;

use dmt_core::{ChannelMatrix, Complex64};
use dmt_exp::{Session, SystemParams};
use dmt_svd::PowerOpts;

fn params(nt: usize, nr: usize, streams: usize) -> SystemParams {
    SystemParams {
        nt,
        nr,
        streams,
        ..SystemParams::default()
    }
}

fn unit_gain_channel(nr: usize, nt: usize) -> ChannelMatrix {
    ChannelMatrix::from_fn(nr, nt, |i, j| {
        Complex64::from_polar(1.0, (i * j) as f64 * 1.3 + (i + 2 * j) as f64 * 0.41)
    })
    .unwrap()
}

fn covers(groups: &[Vec<usize>], n: usize) -> bool {
    let mut seen = BTreeSet::new();
    groups.iter().flatten().all(|&idx| seen.insert(idx)) && seen == (0..n).collect::<BTreeSet<_>>()
}

#[test]
fn optimize_requires_a_channel() {
    let mut session = Session::new(params(4, 4, 2), PowerOpts::default(), 1).unwrap();
    let err = session.optimize().unwrap_err();
    assert_eq!(err.code(), "channel-missing");
    assert!(session.optimized().is_none());
}

#[test]
fn optimized_groups_partition_both_sides() {
    let mut session = Session::new(params(5, 3, 2), PowerOpts::default(), 9).unwrap();
    session.generate().unwrap();
    let system = session.optimize().unwrap().clone();
    assert_eq!(system.streams.len(), 2);
    assert!(covers(&system.tx_groups, 5));
    assert!(covers(&system.rx_groups, 3));
    for (k, group) in system.tx_groups.iter().enumerate() {
        assert_eq!(group[0], system.leaders.tx[k]);
    }
    let weakest = if system.svd.s[1] < system.svd.s[0] { 1 } else { 0 };
    assert_eq!(system.weakest, Some(weakest));
    let summed: f64 = system.streams.iter().map(|s| s.capacity).sum();
    assert!((system.total_capacity - summed).abs() < 1e-12);
}

#[test]
fn regenerating_drops_the_previous_optimization() {
    let mut session = Session::new(params(3, 3, 1), PowerOpts::default(), 3).unwrap();
    let first = session.generate().unwrap().clone();
    session.optimize().unwrap();
    let second = session.generate().unwrap().clone();
    assert_ne!(first, second);
    assert!(session.optimized().is_none());
}

#[test]
fn reset_rewinds_to_the_seed() {
    let mut session = Session::new(params(3, 2, 1), PowerOpts::default(), 11).unwrap();
    let first = session.generate().unwrap().clone();
    session.reset();
    assert!(session.channel().is_none());
    let again = session.generate().unwrap().clone();
    assert_eq!(first, again);
}

#[test]
fn equal_seeds_give_equal_systems() {
    let run = || {
        let mut session = Session::new(params(4, 4, 3), PowerOpts::fixed(40), 2024).unwrap();
        session.generate().unwrap();
        session.optimize().unwrap().clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn stream_count_is_validated() {
    let err = Session::new(params(4, 4, 5), PowerOpts::default(), 0).unwrap_err();
    assert_eq!(err.code(), "stream-count");
    let err = Session::new(params(0, 4, 1), PowerOpts::default(), 0).unwrap_err();
    assert_eq!(err.code(), "empty-array");

    let mut session = Session::new(params(4, 2, 1), PowerOpts::default(), 0).unwrap();
    assert_eq!(session.set_streams(3).unwrap_err().code(), "stream-count");
    session.set_streams(2).unwrap();
    assert_eq!(session.params().streams, 2);
}

#[test]
fn loaded_channel_must_match_antenna_counts() {
    let mut session = Session::new(params(2, 3, 1), PowerOpts::default(), 0).unwrap();
    let err = session.load_channel(unit_gain_channel(2, 3)).unwrap_err();
    assert_eq!(err.code(), "channel-shape");
    session.load_channel(unit_gain_channel(3, 2)).unwrap();
    assert!(session.channel().is_some());
}

#[test]
fn single_stream_takes_every_antenna() {
    let mut session = Session::new(params(2, 2, 1), PowerOpts::default(), 5).unwrap();
    session.generate().unwrap();
    let system = session.optimize().unwrap();
    assert_eq!(system.tx_groups.len(), 1);
    assert_eq!(system.rx_groups.len(), 1);
    assert!(covers(&system.tx_groups, 2));
    assert!(covers(&system.rx_groups, 2));
    assert_eq!(system.leaders.tx.len(), 1);
    assert_eq!(system.leaders.rx.len(), 1);
}

#[test]
fn uniform_gain_channel_splits_evenly() {
    let mut session = Session::new(params(4, 4, 2), PowerOpts::default(), 8).unwrap();
    session.load_channel(unit_gain_channel(4, 4)).unwrap();
    let system = session.optimize().unwrap();
    for stream in &system.streams {
        assert_eq!(stream.tx_antennas.len(), 2);
        assert_eq!(stream.rx_antennas.len(), 2);
        assert!((stream.total_gain - 4.0).abs() < 1e-9);
    }
    let snrs: Vec<f64> = system.streams.iter().map(|s| s.snr_db).collect();
    assert!((snrs[0] - snrs[1]).abs() < 1e-9);
    assert_eq!(system.streams[0].outage, system.streams[1].outage);
}
