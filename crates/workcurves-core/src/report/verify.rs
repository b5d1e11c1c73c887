//! Independent re-check of an aggregated curve collection.

use serde::{Deserialize, Serialize};

use crate::curves::CurveCollection;
use crate::dataset::{Dataset, HOURS_PER_DAY};

/// Default tolerance for comparing recomputed means.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Outcome of [`verify_curves`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Curves that carried a window and were recomputed
    pub curves_checked: usize,
    /// Curves read without a window, which cannot be recomputed
    pub curves_skipped: usize,
    /// Largest absolute per-hour difference seen
    pub max_profile_deviation: f64,
    /// Largest absolute self-report difference seen
    pub max_report_deviation: f64,
    /// Indices of curves with no members, or whose recorded day count disagrees
    pub membership_mismatches: Vec<usize>,
    /// Whether window starts strictly increase
    pub ordered: bool,
    pub tolerance: f64,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.ordered
            && self.membership_mismatches.is_empty()
            && self.max_profile_deviation <= self.tolerance
            && self.max_report_deviation <= self.tolerance
    }
}

/// Recompute each curve from `dataset` by a fresh scan and compare.
pub fn verify_curves(
    dataset: &Dataset,
    collection: &CurveCollection,
    tolerance: f64,
) -> VerificationReport {
    let mut report = VerificationReport {
        curves_checked: 0,
        curves_skipped: 0,
        max_profile_deviation: 0.0,
        max_report_deviation: 0.0,
        membership_mismatches: Vec::new(),
        ordered: true,
        tolerance,
    };

    let mut previous_start: Option<f64> = None;

    for (index, curve) in collection.iter().enumerate() {
        let Some(window) = curve.window else {
            report.curves_skipped += 1;
            continue;
        };
        report.curves_checked += 1;

        if previous_start.is_some_and(|prev| window.start <= prev) {
            report.ordered = false;
        }
        previous_start = Some(window.start);

        let members: Vec<_> = dataset
            .days()
            .iter()
            .filter(|d| window.contains(d.total_activity()))
            .collect();

        let count_known = curve.day_count > 0;
        if members.is_empty() || (count_known && members.len() != curve.day_count) {
            report.membership_mismatches.push(index);
            continue;
        }

        let n = members.len() as f64;
        for hour in 0..HOURS_PER_DAY {
            let mean = members.iter().map(|d| d.hourly[hour]).sum::<f64>() / n;
            let deviation = (mean - curve.profile[hour]).abs();
            report.max_profile_deviation = report.max_profile_deviation.max(deviation);
        }
        let mean_report = members.iter().map(|d| d.self_report).sum::<f64>() / n;
        report.max_report_deviation = report
            .max_report_deviation
            .max((mean_report - curve.self_report).abs());
    }

    if report.passed() {
        tracing::debug!("Verified {} curves", report.curves_checked);
    } else {
        tracing::warn!(
            "Curve verification failed: {} membership mismatches, max deviation {:e}, ordered: {}",
            report.membership_mismatches.len(),
            report.max_profile_deviation.max(report.max_report_deviation),
            report.ordered
        );
    }

    report
}
