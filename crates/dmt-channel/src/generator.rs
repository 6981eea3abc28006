use std::f64::consts::PI;

use dmt_core::errors::{DmtError, ErrorInfo};
use dmt_core::{ChannelMatrix, Complex64};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-width of the uniform component distribution giving `E[x^2] = 1/2`.
const UNIFORM_HALF_WIDTH: f64 = 1.224_744_871_391_589; // sqrt(1.5)

/// Distribution of the i.i.d. channel entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelModel {
    /// Circularly symmetric complex Gaussian entries (Rayleigh fading).
    #[default]
    Rayleigh,
    /// Real and imaginary parts uniform on `[-sqrt(1.5), sqrt(1.5)]`.
    Uniform,
}

impl ChannelModel {
    /// Draws a single unit-average-power entry.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Complex64 {
        match self {
            ChannelModel::Rayleigh => complex_gaussian(rng),
            ChannelModel::Uniform => Complex64::new(
                rng.gen_range(-UNIFORM_HALF_WIDTH..=UNIFORM_HALF_WIDTH),
                rng.gen_range(-UNIFORM_HALF_WIDTH..=UNIFORM_HALF_WIDTH),
            ),
        }
    }
}

/// Box-Muller draw of a `CN(0, 1)` sample.
///
/// Each component is a standard normal scaled by `1/sqrt(2)`.
pub fn complex_gaussian<R: Rng + ?Sized>(rng: &mut R) -> Complex64 {
    // gen::<f64>() is in [0, 1); flip to (0, 1] so ln never sees zero.
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    let magnitude = (-2.0 * u1.ln()).sqrt();
    let phase = 2.0 * PI * u2;
    Complex64::new(
        magnitude * phase.cos() / std::f64::consts::SQRT_2,
        magnitude * phase.sin() / std::f64::consts::SQRT_2,
    )
}

/// Generates an `nr x nt` channel with i.i.d. entries drawn from `model`.
pub fn generate_channel<R: Rng + ?Sized>(
    nr: usize,
    nt: usize,
    model: ChannelModel,
    rng: &mut R,
) -> Result<ChannelMatrix, DmtError> {
    if nr == 0 || nt == 0 {
        return Err(DmtError::Dimension(
            ErrorInfo::new("empty-array", "antenna counts must be positive")
                .with_context("nr", nr)
                .with_context("nt", nt),
        ));
    }
    ChannelMatrix::from_fn(nr, nt, |_, _| model.sample(&mut *rng))
}
