//! Re-export of configuration and error types from `tempora-types`.
// Consolidated re-exports so downstream crates can depend on `tempora-core` only

pub use tempora_types::{Bound, CombineOp, TableColumns, TimeFormat, TimeSeriesError};

pub use chrono::{DateTime, TimeDelta, Utc};
