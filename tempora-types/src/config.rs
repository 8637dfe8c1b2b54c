//! Configuration types shared by the series factories and operators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column selection for building a series from row-oriented tabular input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumns {
    /// Column holding the raw time representation.
    pub time: String,
    /// Column holding the main values.
    pub value: String,
    /// Optional column holding the lower confidence bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lo: Option<String>,
    /// Optional column holding the upper confidence bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hi: Option<String>,
}

impl TableColumns {
    /// Select the mandatory time and value columns.
    pub fn new(time: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            value: value.into(),
            lo: None,
            hi: None,
        }
    }

    /// Also select a lower confidence bound column.
    #[must_use]
    pub fn with_lo(mut self, column: impl Into<String>) -> Self {
        self.lo = Some(column.into());
        self
    }

    /// Also select an upper confidence bound column.
    #[must_use]
    pub fn with_hi(mut self, column: impl Into<String>) -> Self {
        self.hi = Some(column.into());
        self
    }
}

/// How raw time cells are turned into UTC timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TimeFormat {
    /// RFC 3339 with an explicit offset, e.g. `2020-01-01T00:00:00Z`.
    #[default]
    Rfc3339,
    /// Calendar date `%Y-%m-%d`, taken as midnight UTC.
    Date,
    /// `chrono` strftime pattern without offset, interpreted as UTC.
    NaiveDateTime(String),
    /// Integer seconds since the Unix epoch.
    UnixSeconds,
    /// Integer milliseconds since the Unix epoch.
    UnixMillis,
}

/// Elementwise binary operator used to combine two aligned series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombineOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`, with IEEE-754 semantics for zero divisors.
    Div,
}

impl CombineOp {
    /// Apply the operator to a single pair of samples.
    #[must_use]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}

/// Selector for one of the two optional confidence bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    /// Lower confidence bound.
    Lo,
    /// Upper confidence bound.
    Hi,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lo => f.write_str("lower"),
            Self::Hi => f.write_str("upper"),
        }
    }
}
