//! Row-oriented tabular input.
//!
//! Readers of concrete formats (CSV, spreadsheets, query results) live
//! outside this crate; they only need to expose their cells through
//! [`Tabular`]. [`RowTable`] is a simple owned implementation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::TimeSeries;
use crate::series::rejected;
use tempora_types::{TableColumns, TimeFormat, TimeSeriesError};

/// Read access to a table of raw text cells addressed by row and column.
pub trait Tabular {
    /// Column names, in column order.
    fn column_names(&self) -> &[String];

    /// Number of data rows.
    fn row_count(&self) -> usize;

    /// Raw cell at `(row, column)`, or `None` if the row is short.
    fn cell(&self, row: usize, column: usize) -> Option<&str>;

    /// Position of the column named `name`.
    fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names().iter().position(|c| c == name)
    }
}

/// An owned, row-major table of text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RowTable {
    /// Create a table with the given header and no rows.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row of cells.
    #[must_use]
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }
}

impl Tabular for RowTable {
    fn column_names(&self) -> &[String] {
        &self.columns
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

/// Parse one raw time cell according to `format`, returning the parser's
/// message on failure.
pub(crate) fn parse_timestamp(raw: &str, format: &TimeFormat) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    match format {
        TimeFormat::Rfc3339 => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| e.to_string()),
        TimeFormat::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| e.to_string())?
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| format!("no midnight for date {raw}")),
        TimeFormat::NaiveDateTime(pattern) => NaiveDateTime::parse_from_str(raw, pattern)
            .map(|dt| dt.and_utc())
            .map_err(|e| e.to_string()),
        TimeFormat::UnixSeconds => {
            let secs: i64 = raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
            DateTime::from_timestamp(secs, 0).ok_or_else(|| format!("timestamp {secs}s out of range"))
        }
        TimeFormat::UnixMillis => {
            let millis: i64 = raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
            DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| format!("timestamp {millis}ms out of range"))
        }
        _ => Err(format!("unsupported time format {format:?}")),
    }
}

struct Column<'a> {
    name: &'a str,
    index: usize,
}

impl<'a> Column<'a> {
    fn resolve<T: Tabular + ?Sized>(table: &T, name: &'a str) -> Result<Self, TimeSeriesError> {
        let index = table
            .column_index(name)
            .ok_or_else(|| rejected(TimeSeriesError::missing_column(name)))?;
        Ok(Self { name, index })
    }

    fn raw<'t, T: Tabular + ?Sized>(&self, table: &'t T, row: usize) -> Result<&'t str, TimeSeriesError> {
        table
            .cell(row, self.index)
            .ok_or_else(|| rejected(TimeSeriesError::parse(self.name, row, "missing cell")))
    }

    fn number<T: Tabular + ?Sized>(&self, table: &T, row: usize) -> Result<f64, TimeSeriesError> {
        self.raw(table, row)?
            .trim()
            .parse::<f64>()
            .map_err(|e| rejected(TimeSeriesError::parse(self.name, row, e)))
    }
}

impl TimeSeries {
    /// Build a series from selected columns of a row-oriented table.
    ///
    /// The time column is parsed with `format` and zipped with the value
    /// column (and the optional bound columns); the table's own row order is
    /// irrelevant.
    ///
    /// ```
    /// use tempora_core::{RowTable, TableColumns, TimeFormat, TimeSeries};
    ///
    /// let table = RowTable::new(["date", "sales"])
    ///     .with_row(["2020-01-02", "20"])
    ///     .with_row(["2020-01-01", "10"])
    ///     .with_row(["2020-01-03", "30"]);
    /// let ts = TimeSeries::from_table(&table, &TableColumns::new("date", "sales"), &TimeFormat::Date).unwrap();
    /// assert_eq!(ts.values(), vec![10.0, 20.0, 30.0]);
    /// ```
    ///
    /// # Errors
    /// - `MissingColumn` if a selected column does not exist.
    /// - `Parse` if a time or numeric cell cannot be parsed.
    /// - Any error of [`TimeSeriesBuilder::build`](crate::TimeSeriesBuilder::build).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tempora::tabular::from_table",
            level = "debug",
            skip(table, columns),
            fields(rows = table.row_count(), time = %columns.time, value = %columns.value),
        )
    )]
    pub fn from_table<T: Tabular + ?Sized>(
        table: &T,
        columns: &TableColumns,
        format: &TimeFormat,
    ) -> Result<Self, TimeSeriesError> {
        let time = Column::resolve(table, &columns.time)?;
        let value = Column::resolve(table, &columns.value)?;
        let lo = columns
            .lo
            .as_deref()
            .map(|name| Column::resolve(table, name))
            .transpose()?;
        let hi = columns
            .hi
            .as_deref()
            .map(|name| Column::resolve(table, name))
            .transpose()?;

        let rows = table.row_count();
        let mut points = Vec::with_capacity(rows);
        let mut lo_points = lo.as_ref().map(|_| Vec::with_capacity(rows));
        let mut hi_points = hi.as_ref().map(|_| Vec::with_capacity(rows));

        for row in 0..rows {
            let ts = parse_timestamp(time.raw(table, row)?, format)
                .map_err(|e| rejected(TimeSeriesError::parse(time.name, row, e)))?;
            points.push((ts, value.number(table, row)?));
            if let (Some(col), Some(out)) = (&lo, &mut lo_points) {
                out.push((ts, col.number(table, row)?));
            }
            if let (Some(col), Some(out)) = (&hi, &mut hi_points) {
                out.push((ts, col.number(table, row)?));
            }
        }

        let mut builder = Self::builder().points(points);
        if let Some(lo) = lo_points {
            builder = builder.confidence_lo(lo);
        }
        if let Some(hi) = hi_points {
            builder = builder.confidence_hi(hi);
        }
        builder.build()
    }
}
