#![deny(missing_docs)]
#![doc = "Synthetic MIMO channel generation, Gram matrix builders and antenna energy ranking."]

/// Per-antenna energy summaries.
pub mod energy;
/// Random channel realizations.
pub mod generator;
/// `H^H H` and `H H^H` builders.
pub mod gram;

pub use energy::{antenna_energies, top_indices_by_energy};
pub use generator::{complex_gaussian, generate_channel, ChannelModel};
pub use gram::{build_gram, build_outer_gram};
