use dmt_core::Complex64;
use dmt_svd::{dominant_index, select_leaders, SvdResult};

fn real(values: &[f64]) -> Vec<Complex64> {
    values.iter().map(|&x| Complex64::new(x, 0.0)).collect()
}

#[test]
fn dominant_index_prefers_first_on_ties() {
    assert_eq!(dominant_index(&real(&[0.1, 0.7, -0.7, 0.2])), Some(1));
    assert_eq!(dominant_index(&real(&[0.5, 0.5])), Some(0));
    assert_eq!(dominant_index(&[]), None);
}

#[test]
fn leaders_follow_largest_loading() {
    let svd = SvdResult {
        u: vec![real(&[0.1, 0.9, 0.1]), real(&[0.9, 0.1, 0.1])],
        v: vec![real(&[0.2, 0.1, 0.95]), real(&[0.8, 0.5, 0.1])],
        s: vec![2.0, 1.0],
    };
    let leaders = select_leaders(&svd);
    assert_eq!(leaders.tx, vec![2, 0]);
    assert_eq!(leaders.rx, vec![1, 0]);
}

#[test]
fn colliding_leaders_take_next_best_distinct_antenna() {
    let svd = SvdResult {
        u: vec![real(&[0.9, 0.3]), real(&[0.8, 0.6])],
        v: vec![real(&[0.1, 0.9, 0.4]), real(&[0.2, 0.9, 0.4])],
        s: vec![2.0, 1.0],
    };
    let leaders = select_leaders(&svd);
    assert_eq!(leaders.tx, vec![1, 2]);
    assert_eq!(leaders.rx, vec![0, 1]);
}
