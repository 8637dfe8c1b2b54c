//! The [`TimeSeries`] value type.
//!
//! Modules include:
//! - `infer`: uniform-step inference and index comparison
//! - `slice`: inclusive range selection and splitting
//! - `combine`: elementwise algebra between aligned series

mod combine;
mod infer;
mod slice;

pub use infer::infer_frequency;

use chrono::{DateTime, TimeDelta, Utc};

use crate::Frequency;
use tempora_types::{Bound, TimeSeriesError};

/// An immutable, uniformly-sampled numeric time series.
///
/// Invariants, checked once at construction:
/// - at least one sample;
/// - timestamps strictly increasing and evenly spaced by [`frequency`](Self::frequency);
/// - each present confidence bound is indexed by exactly the same timestamps.
///
/// Accessors hand out copies, and every transformation returns a new
/// instance, so the invariants hold for the lifetime of a value.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    confidence_lo: Option<Vec<f64>>,
    confidence_hi: Option<Vec<f64>>,
    freq: Frequency,
}

/// Log a validation rejection when tracing is enabled, then hand it back.
pub(crate) fn rejected(err: TimeSeriesError) -> TimeSeriesError {
    #[cfg(feature = "tracing")]
    tracing::debug!(error = %err, "time series operation rejected");
    err
}

/// Builder for a validated [`TimeSeries`].
///
/// Samples may be pushed in any order; they are sorted by timestamp before
/// validation.
///
/// ```
/// use chrono::{DateTime, Utc};
/// use tempora_core::TimeSeries;
///
/// fn day(d: i64) -> DateTime<Utc> { DateTime::from_timestamp(d * 86_400, 0).unwrap() }
///
/// let ts = TimeSeries::builder()
///     .point(day(2), 3.0)
///     .point(day(0), 1.0)
///     .point(day(1), 2.0)
///     .confidence_lo([(day(0), 0.5), (day(1), 1.5), (day(2), 2.5)])
///     .build()
///     .unwrap();
/// assert_eq!(ts.values(), vec![1.0, 2.0, 3.0]);
/// assert_eq!(ts.frequency().to_string(), "D");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesBuilder {
    points: Vec<(DateTime<Utc>, f64)>,
    confidence_lo: Option<Vec<(DateTime<Utc>, f64)>>,
    confidence_hi: Option<Vec<(DateTime<Utc>, f64)>>,
    frequency: Option<Frequency>,
}

impl TimeSeriesBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one `(timestamp, value)` sample.
    #[must_use]
    pub fn point(mut self, ts: DateTime<Utc>, value: f64) -> Self {
        self.points.push((ts, value));
        self
    }

    /// Add many samples.
    #[must_use]
    pub fn points<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        self.points.extend(points);
        self
    }

    /// Attach a lower confidence bound, indexed by its own timestamps.
    #[must_use]
    pub fn confidence_lo<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        self.confidence_lo = Some(points.into_iter().collect());
        self
    }

    /// Attach an upper confidence bound, indexed by its own timestamps.
    #[must_use]
    pub fn confidence_hi<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        self.confidence_hi = Some(points.into_iter().collect());
        self
    }

    /// Declare the expected step instead of inferring it.
    ///
    /// Every gap must then equal `freq`, and a single sample is accepted.
    #[must_use]
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.frequency = Some(freq);
        self
    }

    /// Sort and validate the collected samples.
    ///
    /// # Errors
    /// - `EmptyInput` if no sample was added.
    /// - `UndeterminedFrequency` for a single sample without a declared frequency.
    /// - `IrregularFrequency` if the sorted timestamps are not evenly spaced,
    ///   contain duplicates, or disagree with the declared frequency.
    /// - `ConfidenceIndexMismatch` if a bound is not indexed exactly like the
    ///   main samples.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tempora::series::build",
            level = "debug",
            skip(self),
            fields(
                len = self.points.len(),
                has_lo = self.confidence_lo.is_some(),
                has_hi = self.confidence_hi.is_some(),
            ),
        )
    )]
    pub fn build(self) -> Result<TimeSeries, TimeSeriesError> {
        let Self {
            mut points,
            confidence_lo,
            confidence_hi,
            frequency,
        } = self;

        points.sort_by_key(|&(ts, _)| ts);
        let (timestamps, values): (Vec<_>, Vec<_>) = points.into_iter().unzip();
        let freq = infer::uniform_step(&timestamps, frequency).map_err(rejected)?;

        let confidence_lo = confidence_lo
            .map(|b| align_bound(b, &timestamps, Bound::Lo))
            .transpose()?;
        let confidence_hi = confidence_hi
            .map(|b| align_bound(b, &timestamps, Bound::Hi))
            .transpose()?;

        Ok(TimeSeries {
            timestamps,
            values,
            confidence_lo,
            confidence_hi,
            freq,
        })
    }
}

fn align_bound(
    mut points: Vec<(DateTime<Utc>, f64)>,
    index: &[DateTime<Utc>],
    bound: Bound,
) -> Result<Vec<f64>, TimeSeriesError> {
    points.sort_by_key(|&(ts, _)| ts);
    let (timestamps, values): (Vec<_>, Vec<_>) = points.into_iter().unzip();
    if !infer::same_index(&timestamps, index) {
        return Err(rejected(TimeSeriesError::ConfidenceIndexMismatch { bound }));
    }
    Ok(values)
}

fn zip_index<'a>(
    times: &'a [DateTime<Utc>],
    values: &'a [f64],
) -> impl Iterator<Item = (DateTime<Utc>, f64)> + 'a {
    times.iter().copied().zip(values.iter().copied())
}

impl TimeSeries {
    /// Start building a new series.
    #[must_use]
    pub fn builder() -> TimeSeriesBuilder {
        TimeSeriesBuilder::new()
    }

    /// Build a series from parallel arrays sharing one time index.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if an array's length differs from `times`,
    /// otherwise any error of [`TimeSeriesBuilder::build`].
    pub fn from_times_and_values(
        times: &[DateTime<Utc>],
        values: &[f64],
        confidence_lo: Option<&[f64]>,
        confidence_hi: Option<&[f64]>,
    ) -> Result<Self, TimeSeriesError> {
        let check = |what: &str, found: usize| {
            if found == times.len() {
                Ok(())
            } else {
                Err(rejected(TimeSeriesError::length_mismatch(
                    what,
                    times.len(),
                    found,
                )))
            }
        };
        check("values", values.len())?;
        if let Some(lo) = confidence_lo {
            check("confidence_lo", lo.len())?;
        }
        if let Some(hi) = confidence_hi {
            check("confidence_hi", hi.len())?;
        }

        let mut builder = Self::builder().points(zip_index(times, values));
        if let Some(lo) = confidence_lo {
            builder = builder.confidence_lo(zip_index(times, lo));
        }
        if let Some(hi) = confidence_hi {
            builder = builder.confidence_hi(zip_index(times, hi));
        }
        builder.build()
    }

    /// Re-run construction for data derived from this series, declaring its
    /// frequency so single-sample results stay representable.
    pub(crate) fn derive(
        &self,
        timestamps: &[DateTime<Utc>],
        values: Vec<f64>,
        confidence_lo: Option<Vec<f64>>,
        confidence_hi: Option<Vec<f64>>,
    ) -> Result<Self, TimeSeriesError> {
        let zip = |vals: Vec<f64>| timestamps.iter().copied().zip(vals).collect::<Vec<_>>();
        let mut builder = Self::builder().frequency(self.freq).points(zip(values));
        if let Some(lo) = confidence_lo {
            builder = builder.confidence_lo(zip(lo));
        }
        if let Some(hi) = confidence_hi {
            builder = builder.confidence_hi(zip(hi));
        }
        builder.build()
    }

    /// First timestamp.
    #[must_use]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.timestamps[0]
    }

    /// Last timestamp.
    #[must_use]
    pub fn end_time(&self) -> DateTime<Utc> {
        self.timestamps[self.timestamps.len() - 1]
    }

    /// `end_time() - start_time()`; zero for a single sample.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end_time() - self.start_time()
    }

    /// Number of samples (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always `false`: an empty series cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Copy of the sample values, in time order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.values.clone()
    }

    /// Copy of the time index.
    #[must_use]
    pub fn time_index(&self) -> Vec<DateTime<Utc>> {
        self.timestamps.clone()
    }

    /// The uniform spacing between consecutive timestamps.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.freq
    }

    /// Copy of the lower confidence bound, if present.
    #[must_use]
    pub fn confidence_lo(&self) -> Option<Vec<f64>> {
        self.confidence_lo.clone()
    }

    /// Copy of the upper confidence bound, if present.
    #[must_use]
    pub fn confidence_hi(&self) -> Option<Vec<f64>> {
        self.confidence_hi.clone()
    }

    /// Copy of the selected confidence bound, if present.
    #[must_use]
    pub fn bound(&self, bound: Bound) -> Option<Vec<f64>> {
        match bound {
            Bound::Lo => self.confidence_lo(),
            Bound::Hi => self.confidence_hi(),
        }
    }

    /// Iterate over `(timestamp, value)` pairs in time order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// `true` if both series have exactly the same time index.
    #[must_use]
    pub fn has_same_time_as(&self, other: &Self) -> bool {
        infer::same_index(&self.timestamps, &other.timestamps)
    }
}
