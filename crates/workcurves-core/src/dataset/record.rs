//! Day records and the in-memory dataset.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// Number of hourly bins in one day record.
pub const HOURS_PER_DAY: usize = 24;

/// Upper bound for a single hourly bin, in minutes.
pub const MAX_MINUTES_PER_HOUR: f64 = 60.0;

/// One day of activity: minutes active in each hour plus a self-report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Minutes of activity per hour (index 0 = 00:00-01:00)
    pub hourly: [f64; HOURS_PER_DAY],
    /// Self-reported activity proxy, usually normalized to 0.0-1.0
    pub self_report: f64,
}

impl DayRecord {
    /// Create a new day record.
    pub fn new(hourly: [f64; HOURS_PER_DAY], self_report: f64) -> Self {
        Self {
            hourly,
            self_report,
        }
    }

    /// Build a day record from a row slice, checking its width.
    pub fn from_row(row: &[f64], self_report: f64) -> Result<Self, CurveError> {
        let hourly: [f64; HOURS_PER_DAY] = row.try_into().map_err(|_| {
            CurveError::ShapeMismatch(format!(
                "expected {} hourly values, got {}",
                HOURS_PER_DAY,
                row.len()
            ))
        })?;
        Ok(Self::new(hourly, self_report))
    }

    /// Total daily activity (sum of the hourly values).
    pub fn total_activity(&self) -> f64 {
        self.hourly.iter().sum()
    }
}

/// Ordered, immutable collection of day records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    days: Vec<DayRecord>,
}

impl Dataset {
    /// Create a dataset from day records.
    pub fn new(days: Vec<DayRecord>) -> Self {
        Self { days }
    }

    /// Build a dataset from an N x 24 matrix and a length-N self-report vector.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ShapeMismatch`] if any row is not 24 wide or the
    /// two inputs disagree on N.
    pub fn from_matrix(data: &[Vec<f64>], self_reports: &[f64]) -> Result<Self, CurveError> {
        if data.len() != self_reports.len() {
            return Err(CurveError::ShapeMismatch(format!(
                "data has {} rows but self_reports has {} values",
                data.len(),
                self_reports.len()
            )));
        }

        let days = data
            .iter()
            .zip(self_reports)
            .enumerate()
            .map(|(i, (row, &report))| {
                DayRecord::from_row(row, report).map_err(|_| {
                    CurveError::ShapeMismatch(format!(
                        "row {} has {} values, expected {}",
                        i,
                        row.len(),
                        HOURS_PER_DAY
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { days })
    }

    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total daily activity of every day, in dataset order.
    pub fn totals(&self) -> Vec<f64> {
        self.days.iter().map(DayRecord::total_activity).collect()
    }

    /// Smallest and largest daily total, or `None` for an empty dataset.
    pub fn total_range(&self) -> Option<(f64, f64)> {
        self.days
            .iter()
            .map(DayRecord::total_activity)
            .fold(None, |acc, t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }

    /// Hourly values outside [0, 60] as `(day, hour, value)`.
    ///
    /// Aggregation does not need the bound; this is a diagnostic only.
    pub fn out_of_range_hours(&self) -> Vec<(usize, usize, f64)> {
        self.days
            .iter()
            .enumerate()
            .flat_map(|(day, record)| {
                record
                    .hourly
                    .iter()
                    .enumerate()
                    .filter(|&(_, &v)| !(0.0..=MAX_MINUTES_PER_HOUR).contains(&v))
                    .map(move |(hour, &v)| (day, hour, v))
            })
            .collect()
    }

    /// Split back into the N x 24 matrix and self-report vector.
    pub fn to_matrix(&self) -> (Vec<Vec<f64>>, Vec<f64>) {
        let data = self.days.iter().map(|d| d.hourly.to_vec()).collect();
        let reports = self.days.iter().map(|d| d.self_report).collect();
        (data, reports)
    }
}
