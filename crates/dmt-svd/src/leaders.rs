use std::collections::BTreeSet;

use dmt_core::{Complex64, Side};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::svd::SvdResult;

/// Leader antenna per stream on each side of the link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaders {
    /// Transmit leaders, one per stream.
    pub tx: Vec<usize>,
    /// Receive leaders, one per stream.
    pub rx: Vec<usize>,
}

/// First index maximizing `|x|^2`, or `None` for an empty vector.
pub fn dominant_index(vector: &[Complex64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in vector.iter().enumerate() {
        let energy = value.norm_sqr();
        match best {
            Some((_, current)) if energy <= current => {}
            _ => best = Some((idx, energy)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Picks one distinct leader per stream on each side.
///
/// Stream `k` takes the index with the largest loading in `V_k` (transmit)
/// and `U_k` (receive). If an earlier, stronger stream already claimed that
/// antenna, the next-highest distinct loading is used instead.
pub fn select_leaders(svd: &SvdResult) -> Leaders {
    Leaders {
        tx: distinct_leaders(&svd.v, Side::Tx),
        rx: distinct_leaders(&svd.u, Side::Rx),
    }
}

fn distinct_leaders(vectors: &[Vec<Complex64>], side: Side) -> Vec<usize> {
    let mut claimed = BTreeSet::new();
    let mut leaders = Vec::with_capacity(vectors.len());
    for (stream, vector) in vectors.iter().enumerate() {
        let ranked = ranked_loadings(vector);
        let Some(&preferred) = ranked.first() else {
            continue;
        };
        let chosen = ranked
            .iter()
            .copied()
            .find(|idx| !claimed.contains(idx))
            .unwrap_or(preferred);
        if chosen != preferred {
            warn!(
                ?side,
                stream,
                preferred,
                chosen,
                "leader collision resolved with next-best antenna"
            );
        }
        claimed.insert(chosen);
        leaders.push(chosen);
    }
    leaders
}

/// Indices ordered by descending `|x|^2`, ties by ascending index.
fn ranked_loadings(vector: &[Complex64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..vector.len()).collect();
    order.sort_by(|&a, &b| {
        vector[b]
            .norm_sqr()
            .partial_cmp(&vector[a].norm_sqr())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}
