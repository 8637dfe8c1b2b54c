use std::ops::{Add, Div, Mul, Sub};

use super::{TimeSeries, rejected};
use tempora_types::{CombineOp, TimeSeriesError};

fn zip_with<F>(a: &[f64], b: &[f64], f: &F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64,
{
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

// A bound survives only when both operands carry it.
fn combine_or_none<F>(a: Option<&Vec<f64>>, b: Option<&Vec<f64>>, f: &F) -> Option<Vec<f64>>
where
    F: Fn(f64, f64) -> f64,
{
    a.zip(b).map(|(a, b)| zip_with(a, b, f))
}

impl TimeSeries {
    /// Combine two series sample by sample with an arbitrary function.
    ///
    /// Values, lower bounds and upper bounds are combined independently. A
    /// bound is present in the result only if both operands carry it.
    ///
    /// # Errors
    /// Returns `IndexMismatch` unless both series have exactly the same time
    /// index.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tempora::series::combine",
            level = "debug",
            skip(self, other, f),
            fields(len = self.len()),
        )
    )]
    pub fn combine_with<F>(&self, other: &Self, f: F) -> Result<Self, TimeSeriesError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if !self.has_same_time_as(other) {
            return Err(rejected(TimeSeriesError::IndexMismatch {
                left_len: self.len(),
                right_len: other.len(),
            }));
        }

        self.derive(
            &self.timestamps,
            zip_with(&self.values, &other.values, &f),
            combine_or_none(
                self.confidence_lo.as_ref(),
                other.confidence_lo.as_ref(),
                &f,
            ),
            combine_or_none(
                self.confidence_hi.as_ref(),
                other.confidence_hi.as_ref(),
                &f,
            ),
        )
    }

    /// Combine two series with one of the arithmetic operators.
    ///
    /// # Errors
    /// Returns `IndexMismatch` unless both series have exactly the same time
    /// index.
    pub fn combine(&self, other: &Self, op: CombineOp) -> Result<Self, TimeSeriesError> {
        self.combine_with(other, |a, b| op.apply(a, b))
    }

    /// Elementwise `self + other`.
    ///
    /// # Errors
    /// See [`combine`](Self::combine).
    pub fn try_add(&self, other: &Self) -> Result<Self, TimeSeriesError> {
        self.combine(other, CombineOp::Add)
    }

    /// Elementwise `self - other`.
    ///
    /// # Errors
    /// See [`combine`](Self::combine).
    pub fn try_sub(&self, other: &Self) -> Result<Self, TimeSeriesError> {
        self.combine(other, CombineOp::Sub)
    }

    /// Elementwise `self * other`.
    ///
    /// # Errors
    /// See [`combine`](Self::combine).
    pub fn try_mul(&self, other: &Self) -> Result<Self, TimeSeriesError> {
        self.combine(other, CombineOp::Mul)
    }

    /// Elementwise `self / other`. Zero divisors yield infinities or NaN.
    ///
    /// # Errors
    /// See [`combine`](Self::combine).
    pub fn try_div(&self, other: &Self) -> Result<Self, TimeSeriesError> {
        self.combine(other, CombineOp::Div)
    }

    /// Apply a scalar function to the values and to every present bound.
    #[must_use]
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let apply = |v: &Vec<f64>| v.iter().map(|&x| f(x)).collect::<Vec<_>>();
        Self {
            timestamps: self.timestamps.clone(),
            values: apply(&self.values),
            confidence_lo: self.confidence_lo.as_ref().map(apply),
            confidence_hi: self.confidence_hi.as_ref().map(apply),
            freq: self.freq,
        }
    }

    /// Add a constant to the values and bounds.
    #[must_use]
    pub fn add_scalar(&self, rhs: f64) -> Self {
        self.map_values(|x| x + rhs)
    }

    /// Multiply the values and bounds by a constant.
    #[must_use]
    pub fn mul_scalar(&self, rhs: f64) -> Self {
        self.map_values(|x| x * rhs)
    }
}

macro_rules! impl_series_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait<&TimeSeries> for &TimeSeries {
            type Output = Result<TimeSeries, TimeSeriesError>;

            fn $method(self, rhs: &TimeSeries) -> Self::Output {
                self.combine(rhs, $op)
            }
        }
    };
}

impl_series_op!(Add, add, CombineOp::Add);
impl_series_op!(Sub, sub, CombineOp::Sub);
impl_series_op!(Mul, mul, CombineOp::Mul);
impl_series_op!(Div, div, CombineOp::Div);
