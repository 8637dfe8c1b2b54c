use chrono::{DateTime, Utc};

use crate::Frequency;
use tempora_types::TimeSeriesError;

/// Infer the uniform step of a set of timestamps.
///
/// The input order does not matter. Every gap between consecutive sorted
/// timestamps must be identical and strictly positive; a duplicated
/// timestamp or a missing sample (which shows up as a doubled gap) is an
/// error.
///
/// ```
/// use chrono::{DateTime, TimeDelta, Utc};
/// use tempora_core::series::infer_frequency;
///
/// fn t(sec: i64) -> DateTime<Utc> { DateTime::from_timestamp(sec, 0).unwrap() }
///
/// let f = infer_frequency(vec![t(120), t(0), t(60)]).unwrap();
/// assert_eq!(f.as_duration(), TimeDelta::seconds(60));
///
/// // 60, 120: one sample is missing
/// assert!(infer_frequency(vec![t(0), t(60), t(180)]).is_err());
/// ```
///
/// # Errors
/// - `EmptyInput` if no timestamp is given.
/// - `UndeterminedFrequency` for a single timestamp.
/// - `IrregularFrequency` if the gaps differ or are not positive.
pub fn infer_frequency(mut timestamps: Vec<DateTime<Utc>>) -> Result<Frequency, TimeSeriesError> {
    timestamps.sort_unstable();
    uniform_step(&timestamps, None)
}

/// Validate that sorted `timestamps` are evenly spaced and return the step.
///
/// When `declared` is set every gap must equal it, and a single timestamp is
/// accepted with the declared step.
pub(crate) fn uniform_step(
    timestamps: &[DateTime<Utc>],
    declared: Option<Frequency>,
) -> Result<Frequency, TimeSeriesError> {
    let (first, rest) = timestamps
        .split_first()
        .ok_or(TimeSeriesError::EmptyInput)?;
    let Some(second) = rest.first() else {
        return declared.ok_or(TimeSeriesError::UndeterminedFrequency);
    };

    let expected = declared.map_or(*second - *first, Frequency::as_duration);
    let Some(freq) = Frequency::new(expected) else {
        return Err(TimeSeriesError::IrregularFrequency {
            at: *second,
            expected,
            found: expected,
        });
    };

    for w in timestamps.windows(2) {
        let found = w[1] - w[0];
        if found != expected {
            return Err(TimeSeriesError::IrregularFrequency {
                at: w[1],
                expected,
                found,
            });
        }
    }
    Ok(freq)
}

/// Full index comparison: same length and pairwise-equal timestamps in order.
pub(crate) fn same_index(a: &[DateTime<Utc>], b: &[DateTime<Utc>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}
