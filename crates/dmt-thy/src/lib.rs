#![deny(missing_docs)]
#![doc = "Closed-form diversity-multiplexing tradeoff: the optimal curve, inverse operating-point solvers and per-rank achievable rates."]

/// The `d(r) = (Nt - r)(Nr - r)` curve.
pub mod curve;
/// Operating points from a target rate or error probability.
pub mod operating;
/// Rates obtained by multiplexing over the strongest singular modes.
pub mod profile;

pub use curve::{diversity_gain, integer_tradeoff_curve, tradeoff_curve, TradeoffPoint};
pub use operating::{
    multiplexing_for_error_probability, multiplexing_for_rate, OperatingPoint,
};
pub use profile::{achievable_rate_profile, RatePoint};

use dmt_core::errors::{DmtError, ErrorInfo};

pub(crate) fn check_antennas(nt: usize, nr: usize) -> Result<usize, DmtError> {
    if nt == 0 || nr == 0 {
        return Err(DmtError::Dimension(
            ErrorInfo::new("empty-array", "antenna counts must be positive")
                .with_context("nt", nt)
                .with_context("nr", nr),
        ));
    }
    Ok(nt.min(nr))
}
