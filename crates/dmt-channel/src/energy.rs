use dmt_core::{ChannelMatrix, Side};

/// Per-antenna channel energy: column sums of `|h|^2` for [`Side::Tx`],
/// row sums for [`Side::Rx`].
pub fn antenna_energies(h: &ChannelMatrix, side: Side) -> Vec<f64> {
    match side {
        Side::Tx => (0..h.cols())
            .map(|tx| (0..h.rows()).map(|rx| h.get(rx, tx).norm_sqr()).sum())
            .collect(),
        Side::Rx => (0..h.rows())
            .map(|rx| h.row(rx).iter().map(|c| c.norm_sqr()).sum())
            .collect(),
    }
}

/// Indices of the `k` highest-energy antennas on `side`, strongest first.
///
/// Equal energies keep ascending index order.
pub fn top_indices_by_energy(h: &ChannelMatrix, k: usize, side: Side) -> Vec<usize> {
    let energies = antenna_energies(h, side);
    let mut order: Vec<usize> = (0..energies.len()).collect();
    order.sort_by(|&a, &b| {
        energies[b]
            .partial_cmp(&energies[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(k);
    order
}
