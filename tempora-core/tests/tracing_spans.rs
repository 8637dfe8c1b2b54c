#![cfg(feature = "tracing")]

use std::io;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tempora_core::{TimeSeries, TimeSeriesError};
use tracing_subscriber::fmt::MakeWriter;

fn t(sec: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(sec, 0).unwrap()
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let out = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(out.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    out.contents()
}

fn minutes(n: i64) -> TimeSeries {
    let times: Vec<_> = (0..n).map(|i| t(i * 60)).collect();
    let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
    TimeSeries::from_times_and_values(&times, &values, None, None).unwrap()
}

#[test]
fn rejected_split_logs_inside_its_span() {
    let ts = minutes(4);
    let logs = capture(|| {
        assert!(matches!(
            ts.split_at(t(61)).unwrap_err(),
            TimeSeriesError::TimestampNotFound { .. }
        ));
    });
    assert!(logs.contains("tempora::series::split_at"), "{logs}");
    assert!(logs.contains("time series operation rejected"), "{logs}");
    assert!(logs.contains("is not in the time series"), "{logs}");
}

#[test]
fn rejected_combination_logs_index_mismatch() {
    let (a, b) = minutes(4).split_at(t(60)).unwrap();
    let logs = capture(|| {
        assert!(a.try_add(&b).is_err());
    });
    assert!(logs.contains("tempora::series::combine"), "{logs}");
    assert!(logs.contains("must have the same time index"), "{logs}");
}

#[test]
fn adapter_rejections_are_logged() {
    let logs = capture(|| {
        let err = TimeSeries::from_times_and_values(&[t(0), t(60)], &[1.0], None, None)
            .unwrap_err();
        assert!(matches!(err, TimeSeriesError::LengthMismatch { .. }));
    });
    assert!(logs.contains("time series operation rejected"), "{logs}");
    assert!(logs.contains("values has 1 entries, expected 2"), "{logs}");
}

#[test]
fn successful_operations_stay_quiet() {
    let ts = minutes(4);
    let logs = capture(|| {
        let (a, b) = ts.split_at(t(60)).unwrap();
        assert_eq!(a.len() + b.len(), 4);
    });
    assert!(!logs.contains("rejected"), "{logs}");
}
