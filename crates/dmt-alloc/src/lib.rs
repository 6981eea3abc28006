#![deny(missing_docs)]
#![doc = "Antenna-to-stream allocation (leader seeding, weakest-first round robin) and per-stream link statistics."]

/// Leader seeding and weakest-first diversity allocation.
pub mod groups;
/// Per-stream SNR, outage and capacity.
pub mod stats;

pub use groups::{allocate_groups, partition_indices, weakest_first_order};
pub use stats::{
    compute_stream_stats, min_snr_db, min_snr_linear, multiplexed_capacity, outage_count,
    snr_to_db, weakest_stream, LinkBudget, StreamGroup,
};
