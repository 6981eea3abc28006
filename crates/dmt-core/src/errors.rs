//! Structured error types shared across DMT crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`DmtError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (dimensions, indices, counts).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the DMT engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum DmtError {
    /// Antenna counts, stream counts or matrix shapes that cannot be served.
    #[error("dimension error: {0}")]
    Dimension(ErrorInfo),
    /// Numeric inputs outside their admissible domain.
    #[error("numeric error: {0}")]
    Numeric(ErrorInfo),
    /// Antenna-to-stream allocation anomalies.
    #[error("allocation error: {0}")]
    Allocation(ErrorInfo),
    /// Pipeline failures (unstable decomposition, cancellation, missing state).
    #[error("computation error: {0}")]
    Computation(ErrorInfo),
    /// Invalid configuration values.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization, schema and IO errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl DmtError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DmtError::Dimension(info)
            | DmtError::Numeric(info)
            | DmtError::Allocation(info)
            | DmtError::Computation(info)
            | DmtError::Config(info)
            | DmtError::Serde(info) => info,
        }
    }

    /// Returns the stable error code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}

/// Rejects a stream count that is zero or exceeds `min(nt, nr)`.
pub fn check_stream_count(nt: usize, nr: usize, streams: usize) -> Result<(), DmtError> {
    if nt == 0 || nr == 0 {
        return Err(DmtError::Dimension(
            ErrorInfo::new("empty-array", "antenna counts must be positive")
                .with_context("nt", nt)
                .with_context("nr", nr),
        ));
    }
    let max_streams = nt.min(nr);
    if streams == 0 || streams > max_streams {
        return Err(DmtError::Dimension(
            ErrorInfo::new(
                "stream-count",
                "number of streams must be between 1 and min(Nt, Nr)",
            )
            .with_context("streams", streams)
            .with_context("max", max_streams),
        ));
    }
    Ok(())
}

/// Largest number of points a threshold, SNR or multiplexing grid may hold.
pub const MAX_GRID_POINTS: usize = 100_000;

/// Rejects a grid whose point count (computed in floating point, before any
/// allocation) exceeds [`MAX_GRID_POINTS`].
pub fn check_grid_points(points: f64) -> Result<usize, DmtError> {
    if !points.is_finite() || points > MAX_GRID_POINTS as f64 {
        return Err(DmtError::Config(
            ErrorInfo::new("grid-too-large", "grid step is too small for its range")
                .with_context("points", points)
                .with_context("max", MAX_GRID_POINTS)
                .with_hint("increase the step or narrow the range"),
        ));
    }
    Ok(points as usize)
}
