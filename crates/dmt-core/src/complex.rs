//! Complex vector kernel built on [`Complex64`].
//!
//! Scalar arithmetic (add, sub, mul, conj, scale, `norm_sqr`) comes from
//! `num-complex`; this module adds the slice-level operations the
//! eigensolver and SVD reconstruction are written against.

use num_complex::Complex64;
use rand::Rng;

/// Floor applied to every vector norm used as a divisor.
pub const NORM_FLOOR: f64 = 1e-18;

/// Squared magnitude `|z|^2`.
#[inline]
pub fn abs2(z: Complex64) -> f64 {
    z.norm_sqr()
}

/// Euclidean norm `sqrt(sum |v_i|^2)`.
pub fn vec_norm(v: &[Complex64]) -> f64 {
    v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
}

/// Returns `v / ||v||`, flooring the norm at [`NORM_FLOOR`].
///
/// A zero vector therefore maps to a zero vector instead of NaNs.
pub fn normalize(v: &[Complex64]) -> Vec<Complex64> {
    let norm = vec_norm(v).max(NORM_FLOOR);
    v.iter().map(|z| *z / norm).collect()
}

/// Complex inner product `a^H b`.
pub fn conj_dot(a: &[Complex64], b: &[Complex64]) -> Complex64 {
    a.iter()
        .zip(b.iter())
        .fold(Complex64::new(0.0, 0.0), |acc, (x, y)| acc + x.conj() * *y)
}

/// Euclidean distance `||a - b||`.
pub fn vec_distance(a: &[Complex64], b: &[Complex64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (*x - *y).norm_sqr())
        .sum::<f64>()
        .sqrt()
}

/// Draws a unit vector whose raw components have real and imaginary parts
/// uniform in `[0, 1)`.
pub fn random_unit_vector<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<Complex64> {
    let raw: Vec<Complex64> = (0..len)
        .map(|_| Complex64::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();
    normalize(&raw)
}
