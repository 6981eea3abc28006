use dmt_channel::{build_gram, build_outer_gram, generate_channel, ChannelModel};
use dmt_core::{ChannelMatrix, Complex64, RngHandle};

#[test]
fn gram_is_hermitian_for_random_channels() {
    for seed in 0..8 {
        let mut rng = RngHandle::from_seed(seed);
        let h = generate_channel(3 + seed as usize % 3, 4, ChannelModel::Rayleigh, &mut rng)
            .expect("channel");
        let a = build_gram(&h);
        assert_eq!(a.size(), 4);
        for j in 0..a.size() {
            for k in 0..a.size() {
                assert!((a.get(j, k) - a.get(k, j).conj()).norm() < 1e-12);
            }
            assert!(a.get(j, j).re >= 0.0);
        }
    }
}

#[test]
fn gram_matches_explicit_sum() {
    let h = ChannelMatrix::from_rows(vec![
        vec![Complex64::new(1.0, 1.0), Complex64::new(0.0, 2.0)],
        vec![Complex64::new(-1.0, 0.0), Complex64::new(3.0, -1.0)],
        vec![Complex64::new(0.5, 0.0), Complex64::new(0.0, 0.0)],
    ])
    .expect("channel");
    let a = build_gram(&h);
    for j in 0..2 {
        for k in 0..2 {
            let expected = (0..3).fold(Complex64::new(0.0, 0.0), |acc, i| {
                acc + h.get(i, j).conj() * h.get(i, k)
            });
            assert!((a.get(j, k) - expected).norm() < 1e-12);
        }
    }
}

#[test]
fn gram_traces_agree_with_frobenius_energy() {
    let mut rng = RngHandle::from_seed(77);
    let h = generate_channel(5, 3, ChannelModel::Rayleigh, &mut rng).expect("channel");
    let frobenius: f64 = h.entries().iter().map(|c| c.norm_sqr()).sum();
    let inner = build_gram(&h);
    let outer = build_outer_gram(&h);
    assert_eq!(outer.size(), 5);
    assert!(outer.is_hermitian(1e-12));
    assert!((inner.trace() - frobenius).abs() < 1e-9);
    assert!((outer.trace() - frobenius).abs() < 1e-9);
}
