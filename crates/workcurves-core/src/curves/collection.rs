//! Curves, the ordered curve collection, and its exchange bundle.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::params::{Window, WindowParams};
use crate::dataset::{DayRecord, HOURS_PER_DAY};
use crate::error::{CurveError, Result};
use crate::storage::{read_json, write_json};

/// Mean activity profile over the days of one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Window that selected the days; absent for curves read from a bare bundle
    pub window: Option<Window>,
    /// Per-hour mean of the selected days
    pub profile: [f64; HOURS_PER_DAY],
    /// Mean self-report of the selected days
    pub self_report: f64,
    /// Number of days averaged (0 when a loaded bundle carried no `day_counts`)
    pub day_count: usize,
}

impl Curve {
    /// Average the days at `members` (dataset indices, ascending).
    ///
    /// Sums run in index order so every strategy yields bit-identical means.
    pub(crate) fn average(days: &[DayRecord], members: &[usize], window: Window) -> Self {
        let mut profile = [0.0; HOURS_PER_DAY];
        let mut report_sum = 0.0;
        for &i in members {
            let day = &days[i];
            for (acc, value) in profile.iter_mut().zip(day.hourly.iter()) {
                *acc += value;
            }
            report_sum += day.self_report;
        }

        let n = members.len() as f64;
        for acc in &mut profile {
            *acc /= n;
        }

        Self {
            window: Some(window),
            profile,
            self_report: report_sum / n,
            day_count: members.len(),
        }
    }

    /// Sum of the mean profile.
    pub fn total_activity(&self) -> f64 {
        self.profile.iter().sum()
    }

    /// Window midpoint, or `None` if the window is unknown.
    pub fn midpoint(&self) -> Option<f64> {
        self.window.map(|w| w.midpoint())
    }

    /// Hour (0-23) with the largest mean activity. Ties go to the earliest hour.
    pub fn peak_hour(&self) -> usize {
        self.profile
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best, max), (h, &v)| {
                if v > max {
                    (h, v)
                } else {
                    (best, max)
                }
            })
            .0
    }
}

/// Curves in increasing order of window start.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveCollection {
    curves: Vec<Curve>,
    params: Option<WindowParams>,
    windows_attempted: usize,
}

impl CurveCollection {
    pub(crate) fn new(curves: Vec<Curve>, params: WindowParams, windows_attempted: usize) -> Self {
        Self {
            curves,
            params: Some(params),
            windows_attempted,
        }
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Parameters used to build the collection, if known.
    pub fn params(&self) -> Option<WindowParams> {
        self.params
    }

    /// Windows evaluated, including empty ones that emitted no curve.
    pub fn windows_attempted(&self) -> usize {
        self.windows_attempted
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Curve> {
        self.curves.iter()
    }

    /// Convert to the exchange bundle.
    pub fn to_bundle(&self) -> CurveBundle {
        let has_windows = self.curves.iter().all(|c| c.window.is_some());
        CurveBundle {
            curves: self.curves.iter().map(|c| c.profile.to_vec()).collect(),
            reports: self.curves.iter().map(|c| c.self_report).collect(),
            window_width: self.params.map(|p| p.window_width),
            offset: self.params.map(|p| p.offset),
            windows: has_windows
                .then(|| self.curves.iter().filter_map(|c| c.window).collect()),
            day_counts: Some(self.curves.iter().map(|c| c.day_count).collect()),
            windows_attempted: Some(self.windows_attempted),
        }
    }

    /// Rebuild a collection from a bundle, checking shapes.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ShapeMismatch`] if rows are not 24 wide, or if
    /// `C_reports`, `windows` or `day_counts` disagree with the row count.
    pub fn from_bundle(bundle: CurveBundle) -> Result<Self, CurveError> {
        let m = bundle.curves.len();
        let check_len = |field: &str, len: usize| {
            if len == m {
                Ok(())
            } else {
                Err(CurveError::ShapeMismatch(format!(
                    "C has {} rows but {} has {} values",
                    m, field, len
                )))
            }
        };
        check_len("C_reports", bundle.reports.len())?;
        if let Some(windows) = &bundle.windows {
            check_len("windows", windows.len())?;
        }
        if let Some(counts) = &bundle.day_counts {
            check_len("day_counts", counts.len())?;
        }

        let mut curves = Vec::with_capacity(m);
        for (i, (row, &report)) in bundle.curves.iter().zip(&bundle.reports).enumerate() {
            let profile: [f64; HOURS_PER_DAY] = row.as_slice().try_into().map_err(|_| {
                CurveError::ShapeMismatch(format!(
                    "curve {} has {} values, expected {}",
                    i,
                    row.len(),
                    HOURS_PER_DAY
                ))
            })?;
            curves.push(Curve {
                window: bundle.windows.as_ref().map(|w| w[i]),
                profile,
                self_report: report,
                day_count: bundle.day_counts.as_ref().map_or(0, |c| c[i]),
            });
        }

        let params = match (bundle.window_width, bundle.offset) {
            (Some(w), Some(o)) => Some(WindowParams::new(w, o)),
            _ => None,
        };

        Ok(Self {
            windows_attempted: bundle.windows_attempted.unwrap_or(m),
            curves,
            params,
        })
    }

    /// Persist as a JSON curve bundle.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        write_json(path, &self.to_bundle())
    }

    /// Load and shape-check a JSON curve bundle.
    pub fn load_json(path: &Path) -> Result<Self> {
        let bundle: CurveBundle = read_json(path)?;
        Ok(Self::from_bundle(bundle)?)
    }
}

impl<'a> IntoIterator for &'a CurveCollection {
    type Item = &'a Curve;
    type IntoIter = std::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

/// On-disk form of a [`CurveCollection`].
///
/// `C` and `C_reports` are the exchange fields; the rest is optional
/// metadata that lets reports place curves by window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveBundle {
    /// M x 24 matrix, one row per curve in window order
    #[serde(rename = "C")]
    pub curves: Vec<Vec<f64>>,
    /// Length-M mean self-reports, same order
    #[serde(rename = "C_reports")]
    pub reports: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<Window>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_counts: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows_attempted: Option<usize>,
}
