use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tempora_core::{Bound, Frequency, TimeSeries, TimeSeriesError, infer_frequency};

fn jan(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, d, 0, 0, 0).unwrap()
}

fn daily(n: u32) -> Vec<DateTime<Utc>> {
    (1..=n).map(jan).collect()
}

#[test]
fn lengths_agree_for_valid_series() {
    let times = daily(5);
    let ts = TimeSeries::from_times_and_values(
        &times,
        &[1.0, 2.0, 3.0, 4.0, 5.0],
        Some([0.0, 1.0, 2.0, 3.0, 4.0].as_slice()),
        Some([2.0, 3.0, 4.0, 5.0, 6.0].as_slice()),
    )
    .unwrap();

    assert_eq!(ts.len(), 5);
    assert_eq!(ts.time_index().len(), 5);
    assert_eq!(ts.values().len(), 5);
    assert_eq!(ts.confidence_lo().unwrap().len(), 5);
    assert_eq!(ts.confidence_hi().unwrap().len(), 5);
    assert!(!ts.is_empty());
}

#[test]
fn accessors_report_range_and_frequency() {
    let ts = TimeSeries::from_times_and_values(&daily(5), &[1.0; 5], None, None).unwrap();
    assert_eq!(ts.start_time(), jan(1));
    assert_eq!(ts.end_time(), jan(5));
    assert_eq!(ts.duration(), TimeDelta::days(4));
    assert_eq!(ts.frequency().as_duration(), TimeDelta::days(1));
    assert_eq!(ts.frequency().to_string(), "D");
    assert!(ts.confidence_lo().is_none());
    assert!(ts.bound(Bound::Hi).is_none());
}

#[test]
fn unsorted_input_is_sorted_with_bounds() {
    let ts = TimeSeries::builder()
        .points([(jan(3), 3.0), (jan(1), 1.0), (jan(2), 2.0)])
        .confidence_lo([(jan(2), 1.5), (jan(3), 2.5), (jan(1), 0.5)])
        .build()
        .unwrap();
    assert_eq!(ts.time_index(), daily(3));
    assert_eq!(ts.values(), vec![1.0, 2.0, 3.0]);
    assert_eq!(ts.confidence_lo(), Some(vec![0.5, 1.5, 2.5]));
    assert_eq!(
        ts.points().collect::<Vec<_>>(),
        vec![(jan(1), 1.0), (jan(2), 2.0), (jan(3), 3.0)]
    );
}

#[test]
fn returned_sequences_are_copies() {
    let ts = TimeSeries::from_times_and_values(&daily(3), &[1.0, 2.0, 3.0], Some([0.0; 3].as_slice()), None)
        .unwrap();
    let mut values = ts.values();
    values[0] = 100.0;
    let mut index = ts.time_index();
    index.clear();
    let mut lo = ts.confidence_lo().unwrap();
    lo[1] = -1.0;

    assert_eq!(ts.values(), vec![1.0, 2.0, 3.0]);
    assert_eq!(ts.len(), 3);
    assert_eq!(ts.confidence_lo(), Some(vec![0.0; 3]));
}

#[test]
fn empty_input_is_rejected() {
    let err = TimeSeries::from_times_and_values(&[], &[], None, None).unwrap_err();
    assert_eq!(err, TimeSeriesError::EmptyInput);
    assert_eq!(
        TimeSeries::builder().build().unwrap_err(),
        TimeSeriesError::EmptyInput
    );
}

#[test]
fn missing_day_is_irregular() {
    let err = TimeSeries::from_times_and_values(&[jan(1), jan(2), jan(4)], &[1.0, 2.0, 3.0], None, None)
        .unwrap_err();
    assert_eq!(
        err,
        TimeSeriesError::IrregularFrequency {
            at: jan(4),
            expected: TimeDelta::days(1),
            found: TimeDelta::days(2),
        }
    );
}

#[test]
fn duplicate_timestamps_are_irregular() {
    let err = TimeSeries::from_times_and_values(&[jan(1), jan(1)], &[1.0, 2.0], None, None)
        .unwrap_err();
    assert!(matches!(err, TimeSeriesError::IrregularFrequency { .. }));

    let err = TimeSeries::from_times_and_values(&[jan(1), jan(2), jan(2), jan(3)], &[1.0; 4], None, None)
        .unwrap_err();
    assert!(matches!(err, TimeSeriesError::IrregularFrequency { .. }));
}

#[test]
fn single_sample_needs_a_declared_frequency() {
    let err = TimeSeries::from_times_and_values(&[jan(1)], &[1.0], None, None).unwrap_err();
    assert_eq!(err, TimeSeriesError::UndeterminedFrequency);

    let day = Frequency::new(TimeDelta::days(1)).unwrap();
    let ts = TimeSeries::builder()
        .point(jan(1), 1.0)
        .frequency(day)
        .build()
        .unwrap();
    assert_eq!(ts.len(), 1);
    assert_eq!(ts.duration(), TimeDelta::zero());
    assert_eq!(ts.frequency(), day);
}

#[test]
fn declared_frequency_must_match_gaps() {
    let hourly = Frequency::new(TimeDelta::hours(1)).unwrap();
    let err = TimeSeries::builder()
        .points([(jan(1), 1.0), (jan(2), 2.0)])
        .frequency(hourly)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        TimeSeriesError::IrregularFrequency { expected, .. } if expected == TimeDelta::hours(1)
    ));
}

#[test]
fn bound_with_different_timestamps_is_rejected() {
    // same length, shifted by one day
    let err = TimeSeries::builder()
        .points([(jan(1), 1.0), (jan(2), 2.0), (jan(3), 3.0)])
        .confidence_hi([(jan(2), 1.0), (jan(3), 2.0), (jan(4), 3.0)])
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        TimeSeriesError::ConfidenceIndexMismatch { bound: Bound::Hi }
    );
}

#[test]
fn bound_with_different_length_is_rejected() {
    let err = TimeSeries::builder()
        .points([(jan(1), 1.0), (jan(2), 2.0), (jan(3), 3.0)])
        .confidence_lo([(jan(1), 1.0), (jan(2), 2.0)])
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        TimeSeriesError::ConfidenceIndexMismatch { bound: Bound::Lo }
    );
}

#[test]
fn parallel_arrays_must_have_equal_lengths() {
    let err = TimeSeries::from_times_and_values(&daily(3), &[1.0, 2.0], None, None).unwrap_err();
    assert_eq!(
        err,
        TimeSeriesError::length_mismatch("values", 3, 2)
    );

    let err = TimeSeries::from_times_and_values(&daily(3), &[1.0; 3], None, Some([1.0; 4].as_slice()))
        .unwrap_err();
    assert!(matches!(
        err,
        TimeSeriesError::LengthMismatch { ref what, expected: 3, found: 4 } if what == "confidence_hi"
    ));
}

#[test]
fn has_same_time_as_compares_full_index() {
    let a = TimeSeries::from_times_and_values(&daily(3), &[1.0; 3], None, None).unwrap();
    let b = TimeSeries::from_times_and_values(&daily(3), &[2.0; 3], None, None).unwrap();
    let shifted: Vec<_> = (2..=4).map(jan).collect();
    let c = TimeSeries::from_times_and_values(&shifted, &[1.0; 3], None, None).unwrap();
    assert!(a.has_same_time_as(&b));
    assert!(!a.has_same_time_as(&c));
}

#[test]
fn infer_frequency_ignores_order() {
    let f = infer_frequency(vec![jan(3), jan(1), jan(2)]).unwrap();
    assert_eq!(f.as_duration(), TimeDelta::days(1));
    assert_eq!(
        infer_frequency(vec![jan(1)]).unwrap_err(),
        TimeSeriesError::UndeterminedFrequency
    );
}

#[test]
fn frequency_aliases() {
    let alias = |d: TimeDelta| Frequency::new(d).unwrap().to_string();
    assert_eq!(alias(TimeDelta::days(1)), "D");
    assert_eq!(alias(TimeDelta::days(3)), "3D");
    assert_eq!(alias(TimeDelta::weeks(1)), "W");
    // weekly aliases are multiples of seven days, not anchored to a weekday
    assert_eq!(alias(TimeDelta::weeks(2)), "2W");
    assert_eq!(alias(TimeDelta::hours(1)), "H");
    assert_eq!(alias(TimeDelta::hours(36)), "36H");
    assert_eq!(alias(TimeDelta::minutes(15)), "15min");
    assert_eq!(alias(TimeDelta::seconds(90)), "90S");
    assert_eq!(alias(TimeDelta::milliseconds(250)), "250ms");
    assert_eq!(alias(TimeDelta::nanoseconds(7)), "7ns");
    assert!(Frequency::new(TimeDelta::seconds(-1)).is_none());
}
