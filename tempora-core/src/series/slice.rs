use chrono::{DateTime, TimeDelta, Utc};

use super::{TimeSeries, rejected};
use tempora_types::TimeSeriesError;

impl TimeSeries {
    /// Samples whose timestamp lies in `[start, end]`, inclusive on both ends.
    ///
    /// Confidence bounds are filtered identically.
    ///
    /// # Errors
    /// Returns `InvalidRange` if `end <= start`, if the range lies entirely
    /// before or after the series, or if no timestamp falls inside it.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tempora::series::slice", level = "debug", skip(self))
    )]
    pub fn slice(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeSeriesError> {
        if end <= start {
            return Err(rejected(TimeSeriesError::invalid_range(
                start,
                end,
                "end must be strictly after start",
            )));
        }
        self.select(start, end)
    }

    /// Equivalent to `slice(start, start + duration)`.
    ///
    /// # Errors
    /// Returns `InvalidRange` if `start + duration` overflows, otherwise any
    /// error of [`slice`](Self::slice).
    pub fn slice_duration(
        &self,
        start: DateTime<Utc>,
        duration: TimeDelta,
    ) -> Result<Self, TimeSeriesError> {
        let end = start.checked_add_signed(duration).ok_or_else(|| {
            rejected(TimeSeriesError::invalid_range(
                start,
                start,
                "duration overflows the timestamp range",
            ))
        })?;
        self.slice(start, end)
    }

    /// Split into `[start_time(), ts]` and `[ts + frequency(), end_time()]`.
    ///
    /// `ts` belongs to the first half only. Either half may hold a single
    /// sample; splitting at `end_time()` leaves nothing for the second half
    /// and is an error.
    ///
    /// ```
    /// use chrono::{DateTime, Utc};
    /// use tempora_core::TimeSeries;
    ///
    /// fn day(d: i64) -> DateTime<Utc> { DateTime::from_timestamp(d * 86_400, 0).unwrap() }
    ///
    /// let times: Vec<_> = (0..5).map(day).collect();
    /// let ts = TimeSeries::from_times_and_values(&times, &[1.0, 2.0, 3.0, 4.0, 5.0], None, None).unwrap();
    /// let (a, b) = ts.split_at(day(2)).unwrap();
    /// assert_eq!(a.values(), vec![1.0, 2.0, 3.0]);
    /// assert_eq!(b.values(), vec![4.0, 5.0]);
    /// assert!(ts.split_at(day(4)).is_err());
    /// ```
    ///
    /// # Errors
    /// - `TimestampNotFound` if `ts` is not in the time index.
    /// - `InvalidRange` if `ts == end_time()`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tempora::series::split_at", level = "debug", skip(self))
    )]
    pub fn split_at(&self, ts: DateTime<Utc>) -> Result<(Self, Self), TimeSeriesError> {
        if self.timestamps.binary_search(&ts).is_err() {
            return Err(rejected(TimeSeriesError::TimestampNotFound { ts }));
        }

        let first = self.select(self.start_time(), ts)?;
        // second half does not include ts
        let next = ts
            .checked_add_signed(self.freq.as_duration())
            .ok_or_else(|| {
                rejected(TimeSeriesError::invalid_range(
                    ts,
                    self.end_time(),
                    "split point is the last representable timestamp",
                ))
            })?;
        let second = self.select(next, self.end_time())?;
        Ok((first, second))
    }

    /// Inclusive selection shared by `slice` and `split_at`; permits `start == end`.
    fn select(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeSeriesError> {
        if end < self.start_time() {
            return Err(rejected(TimeSeriesError::invalid_range(
                start,
                end,
                "end is before the start of the series",
            )));
        }
        if start > self.end_time() {
            return Err(rejected(TimeSeriesError::invalid_range(
                start,
                end,
                "start is after the end of the series",
            )));
        }

        let lo = self.timestamps.partition_point(|t| *t < start);
        let hi = self.timestamps.partition_point(|t| *t <= end);
        if lo >= hi {
            return Err(rejected(TimeSeriesError::invalid_range(
                start,
                end,
                "no timestamp falls inside the range",
            )));
        }

        let cut = |v: &Vec<f64>| v[lo..hi].to_vec();
        self.derive(
            &self.timestamps[lo..hi],
            cut(&self.values),
            self.confidence_lo.as_ref().map(cut),
            self.confidence_hi.as_ref().map(cut),
        )
    }
}
