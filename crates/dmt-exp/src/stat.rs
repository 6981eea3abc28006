use serde::{Deserialize, Serialize};

/// Fixed-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges (inclusive of the left edge, exclusive of the right edge except the last bin).
    pub edges: Vec<f64>,
    /// Counts recorded per bin.
    pub counts: Vec<u64>,
}

/// Quantile summary for a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantiles {
    /// 5th percentile estimate.
    pub q05: f64,
    /// Median (50th percentile) estimate.
    pub q50: f64,
    /// 95th percentile estimate.
    pub q95: f64,
}

/// Distribution summary of a sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Interpolated quantiles.
    pub quantiles: Quantiles,
    /// Histogram spanning `[min, max]`.
    pub histogram: Histogram,
}

/// Summarizes `values` with a `bins`-bin histogram over their own range.
///
/// Empty input yields NaN statistics and an all-zero histogram on `[0, 1]`.
pub fn summarize(values: &[f64], bins: usize) -> SampleSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let (min, max) = match (sorted.first(), sorted.last()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => (f64::NAN, f64::NAN),
    };
    let mean = if sorted.is_empty() {
        f64::NAN
    } else {
        sorted.iter().sum::<f64>() / sorted.len() as f64
    };
    let (start, end) = if sorted.is_empty() {
        (0.0, 1.0)
    } else if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    SampleSummary {
        count: sorted.len(),
        mean,
        min,
        max,
        quantiles: Quantiles {
            q05: percentile(&sorted, 0.05),
            q50: percentile(&sorted, 0.5),
            q95: percentile(&sorted, 0.95),
        },
        histogram: histogram(&sorted, start, end, bins),
    }
}

fn histogram(values: &[f64], start: f64, end: f64, bins: usize) -> Histogram {
    let bins = bins.max(1);
    let step = (end - start) / bins as f64;
    let edges = (0..=bins).map(|idx| start + idx as f64 * step).collect();
    let mut counts = vec![0u64; bins];
    for value in values {
        let mut bin = ((value - start) / step).floor() as isize;
        if bin < 0 {
            bin = 0;
        }
        if bin as usize >= bins {
            bin = (bins as isize) - 1;
        }
        counts[bin as usize] += 1;
    }
    Histogram { edges, counts }
}

fn percentile(values: &[f64], quantile: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let position = quantile * (values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        values[lower]
    } else {
        let weight = position - lower as f64;
        values[lower] * (1.0 - weight) + values[upper] * weight
    }
}
