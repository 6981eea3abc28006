use std::collections::BTreeSet;

use dmt_alloc::{allocate_groups, partition_indices, weakest_first_order};
use proptest::prelude::*;

fn check_partition(groups: &[Vec<usize>], n: usize) {
    let mut seen = BTreeSet::new();
    for group in groups {
        assert!(!group.is_empty());
        for &idx in group {
            assert!(idx < n);
            assert!(seen.insert(idx), "antenna {idx} assigned twice");
        }
    }
    assert_eq!(seen.len(), n);
}

#[test]
fn single_stream_collects_every_antenna() {
    let groups = allocate_groups(2, 1, &[1], &[1.7]).unwrap();
    assert_eq!(groups, vec![vec![1, 0]]);
    check_partition(&groups, 2);
}

#[test]
fn weakest_stream_receives_first_spare() {
    // Stream 1 is weakest, then stream 2, then stream 0.
    let groups = allocate_groups(7, 3, &[4, 0, 2], &[3.0, 1.0, 2.0]).unwrap();
    assert_eq!(groups[1], vec![0, 1, 6]);
    assert_eq!(groups[2], vec![2, 3]);
    assert_eq!(groups[0], vec![4, 5]);
    check_partition(&groups, 7);
}

#[test]
fn equal_strengths_keep_stream_order() {
    assert_eq!(weakest_first_order(&[1.0, 1.0, 0.5]), vec![2, 0, 1]);
    assert_eq!(weakest_first_order(&[3.0, 2.0, 2.0, 1.0]), vec![3, 1, 2, 0]);
}

#[test]
fn duplicate_leaders_are_rejected() {
    let err = allocate_groups(4, 2, &[1, 1], &[2.0, 1.0]).unwrap_err();
    assert_eq!(err.code(), "duplicate-leader");
    assert_eq!(err.info().context.get("stream").map(String::as_str), Some("1"));
}

#[test]
fn malformed_requests_are_rejected() {
    assert_eq!(allocate_groups(2, 3, &[0, 1, 2], &[1.0; 3]).unwrap_err().code(), "stream-count");
    assert_eq!(allocate_groups(3, 0, &[], &[]).unwrap_err().code(), "stream-count");
    assert_eq!(allocate_groups(3, 2, &[0], &[1.0, 2.0]).unwrap_err().code(), "length-mismatch");
    assert_eq!(
        allocate_groups(3, 2, &[0, 3], &[1.0, 2.0]).unwrap_err().code(),
        "leader-out-of-range"
    );
}

#[test]
fn plain_partition_deals_from_stream_zero() {
    let groups = partition_indices(5, 2).unwrap();
    assert_eq!(groups, vec![vec![0, 2, 4], vec![1, 3]]);
}

proptest! {
    #[test]
    fn groups_partition_all_antennas(
        n in 1usize..24,
        r_seed in any::<usize>(),
        shuffle_seed in any::<u64>(),
        strengths_seed in proptest::collection::vec(0.0f64..10.0, 24),
    ) {
        let r = 1 + r_seed % n;
        let mut candidates: Vec<usize> = (0..n).collect();
        // Deterministic Fisher-Yates driven by the proptest seed.
        let mut state = shuffle_seed | 1;
        for i in (1..candidates.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state % (i as u64 + 1)) as usize;
            candidates.swap(i, j);
        }
        let leaders = &candidates[..r];
        let strengths = &strengths_seed[..r];
        let groups = allocate_groups(n, r, leaders, strengths).unwrap();

        prop_assert_eq!(groups.len(), r);
        check_partition(&groups, n);
        for (k, group) in groups.iter().enumerate() {
            prop_assert_eq!(group[0], leaders[k]);
        }

        let weakest = weakest_first_order(strengths)[0];
        let weakest_len = groups[weakest].len();
        let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
        let max = *sizes.iter().max().unwrap();
        let min = *sizes.iter().min().unwrap();
        prop_assert!(max - min <= 1);
        prop_assert_eq!(weakest_len, max);
    }
}
