use std::cmp::Ordering;

use dmt_core::errors::{DmtError, ErrorInfo};
use tracing::debug;

fn error_info(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message)
}

/// Stream indices ordered from weakest to strongest.
///
/// Stable, so equal strengths keep their original stream order. NaN
/// strengths compare equal to everything.
pub fn weakest_first_order(strengths: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..strengths.len()).collect();
    order.sort_by(|&a, &b| {
        strengths[a]
            .partial_cmp(&strengths[b])
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// Partitions antennas `0..n` into `r` stream groups.
///
/// Group `k` starts with `leaders[k]`. The remaining antennas, in ascending
/// index order, are dealt round-robin over the streams sorted from weakest to
/// strongest, so the weakest stream receives the 1st, (r+1)-th, ... spare
/// antenna. Duplicate leaders are rejected because they would leave a group
/// without its seed member.
pub fn allocate_groups(
    n: usize,
    r: usize,
    leaders: &[usize],
    strengths: &[f64],
) -> Result<Vec<Vec<usize>>, DmtError> {
    if r == 0 || r > n {
        return Err(DmtError::Dimension(
            error_info("stream-count", "stream count must be between 1 and n")
                .with_context("n", n)
                .with_context("r", r),
        ));
    }
    if leaders.len() != r || strengths.len() != r {
        return Err(DmtError::Dimension(
            error_info("length-mismatch", "one leader and one strength per stream")
                .with_context("r", r)
                .with_context("leaders", leaders.len())
                .with_context("strengths", strengths.len()),
        ));
    }

    let mut used = vec![false; n];
    let mut groups: Vec<Vec<usize>> = Vec::with_capacity(r);
    for (stream, &leader) in leaders.iter().enumerate() {
        if leader >= n {
            return Err(DmtError::Allocation(
                error_info("leader-out-of-range", "leader index exceeds antenna count")
                    .with_context("stream", stream)
                    .with_context("leader", leader)
                    .with_context("n", n),
            ));
        }
        if used[leader] {
            return Err(DmtError::Allocation(
                error_info("duplicate-leader", "antenna is already leading another stream")
                    .with_context("stream", stream)
                    .with_context("leader", leader)
                    .with_hint("select distinct leaders before allocating"),
            ));
        }
        used[leader] = true;
        groups.push(vec![leader]);
    }

    let order = weakest_first_order(strengths);
    let remaining = (0..n).filter(|&idx| !used[idx]);
    for (slot, antenna) in remaining.enumerate() {
        groups[order[slot % r]].push(antenna);
    }
    debug!(n, r, ?order, "allocated diversity groups");
    Ok(groups)
}

/// Plain partition used before any decomposition is available: stream `k`
/// leads with antenna `k`, spares are dealt round-robin from stream 0.
pub fn partition_indices(n: usize, r: usize) -> Result<Vec<Vec<usize>>, DmtError> {
    let leaders: Vec<usize> = (0..r.min(n)).collect();
    let strengths = vec![0.0; leaders.len()];
    allocate_groups(n, r, &leaders, &strengths)
}
