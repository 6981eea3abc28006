#![deny(missing_docs)]
#![doc = "Core numeric types, structured errors and the deterministic RNG policy for the DMT engine."]

pub mod complex;
pub mod errors;
pub mod matrix;
pub mod provenance;
pub mod rng;

pub use errors::{check_grid_points, check_stream_count, DmtError, ErrorInfo, MAX_GRID_POINTS};
pub use matrix::{ChannelMatrix, HermitianMatrix};
pub use num_complex::Complex64;
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};

/// Transmit or receive side of the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Transmit antennas (channel columns).
    Tx,
    /// Receive antennas (channel rows).
    Rx,
}
