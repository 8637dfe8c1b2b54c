use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Bound;

/// Unified error type for the tempora workspace.
///
/// Every variant is raised eagerly by the operation that detected it; no
/// partially-built series is ever returned alongside an error.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimeSeriesError {
    /// The input carried no samples.
    #[error("time series must have at least one value")]
    EmptyInput,

    /// A single sample was supplied without a declared frequency.
    #[error("cannot infer frequency from a single timestamp")]
    UndeterminedFrequency,

    /// Consecutive timestamps are not evenly spaced (or are duplicated).
    #[error("irregular frequency at {at}: expected step {expected}, found {found}")]
    IrregularFrequency {
        /// Timestamp that closes the offending gap.
        at: DateTime<Utc>,
        /// Step established by the first gap or the declared frequency.
        #[serde(with = "step")]
        expected: TimeDelta,
        /// Step actually observed.
        #[serde(with = "step")]
        found: TimeDelta,
    },

    /// A confidence bound is not indexed exactly like the main series.
    #[error("{bound} confidence interval and main series must have the same time index")]
    ConfidenceIndexMismatch {
        /// Which bound was misaligned.
        bound: Bound,
    },

    /// Slice or split bounds are inconsistent with each other or the series.
    #[error("invalid range [{start}, {end}]: {reason}")]
    InvalidRange {
        /// Requested start (inclusive).
        start: DateTime<Utc>,
        /// Requested end (inclusive).
        end: DateTime<Utc>,
        /// Which precondition failed.
        reason: String,
    },

    /// The split point is not a member of the time index.
    #[error("timestamp {ts} is not in the time series")]
    TimestampNotFound {
        /// Requested split timestamp.
        ts: DateTime<Utc>,
    },

    /// Binary combination on two series with different time indexes.
    #[error("the two time series must have the same time index (lengths {left_len} and {right_len})")]
    IndexMismatch {
        /// Length of the left operand.
        left_len: usize,
        /// Length of the right operand.
        right_len: usize,
    },

    /// Parallel input sequences have different lengths.
    #[error("{what} has {found} entries, expected {expected}")]
    LengthMismatch {
        /// Which input was short or long (e.g. "values").
        what: String,
        /// Length of the timestamp sequence.
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },

    /// A selected column does not exist in the tabular input.
    #[error("missing column: {column}")]
    MissingColumn {
        /// Requested column name.
        column: String,
    },

    /// A cell could not be parsed into a timestamp or number.
    #[error("failed to parse column '{column}' at row {row}: {message}")]
    Parse {
        /// Column the cell belongs to.
        column: String,
        /// Zero-based row index.
        row: usize,
        /// Message from the underlying parser.
        message: String,
    },
}

impl TimeSeriesError {
    /// Helper: build an `InvalidRange` error.
    pub fn invalid_range(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRange {
            start,
            end,
            reason: reason.into(),
        }
    }

    /// Helper: build a `LengthMismatch` error.
    pub fn length_mismatch(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::LengthMismatch {
            what: what.into(),
            expected,
            found,
        }
    }

    /// Helper: build a `Parse` error from any displayable parser error.
    pub fn parse(column: impl Into<String>, row: usize, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            column: column.into(),
            row,
            message: err.to_string(),
        }
    }

    /// Helper: build a `MissingColumn` error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}

// chrono has no serde support for `TimeDelta`; encode it as (seconds, subsecond nanos).
mod step {
    use chrono::TimeDelta;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(step: &TimeDelta, s: S) -> Result<S::Ok, S::Error> {
        (step.num_seconds(), step.subsec_nanos()).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<TimeDelta, D::Error> {
        let (secs, nanos): (i64, i32) = Deserialize::deserialize(d)?;
        TimeDelta::try_seconds(secs)
            .and_then(|t| t.checked_add(&TimeDelta::nanoseconds(i64::from(nanos))))
            .ok_or_else(|| D::Error::custom("step out of range"))
    }
}
