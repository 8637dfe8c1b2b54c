//! tempora-core
//!
//! An immutable, invariant-enforcing representation of a single
//! regularly-sampled numeric time series, optionally paired with lower and
//! upper confidence bounds.
//!
//! - `series`: the [`TimeSeries`] value type, its builder and accessors,
//!   plus slicing, splitting and elementwise combination.
//! - `frequency`: the [`Frequency`] step shared by every instance.
//! - `tabular`: the factory that builds a series from row-oriented input.
//! - `types`: re-exports of the configuration and error types.
//!
//! Every operation validates eagerly and returns a fresh instance; no
//! instance ever shares or mutates another's storage, so a [`TimeSeries`] can
//! be sent and shared across threads freely.
//!
//! Observability
//! -------------
//! Enabling the `tracing` feature instruments construction, slicing,
//! splitting and combination with `tracing` spans, and logs validation
//! rejections at `debug` level.
#![warn(missing_docs)]

/// Strictly positive sampling step.
pub mod frequency;
/// The `TimeSeries` value type and its operations.
pub mod series;
/// Building series from row-oriented tabular input.
pub mod tabular;
pub mod types;

pub use frequency::Frequency;
pub use series::{TimeSeries, TimeSeriesBuilder, infer_frequency};
pub use tabular::{RowTable, Tabular};
pub use types::*;
