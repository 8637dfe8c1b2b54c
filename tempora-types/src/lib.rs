//! Configuration primitives and the error taxonomy shared across the tempora workspace.
#![warn(missing_docs)]

mod config;
mod error;

pub use config::{Bound, CombineOp, TableColumns, TimeFormat};
pub use error::TimeSeriesError;
