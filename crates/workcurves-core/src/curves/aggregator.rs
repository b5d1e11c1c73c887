//! Windowed curve aggregation.
//!
//! A window of fixed width slides over the range of total daily activity.
//! For every window position the days whose total falls inside it are
//! averaged hour by hour into one curve, together with their mean
//! self-report. Windows with no days emit nothing.

use std::cmp::Ordering;

use super::collection::{Curve, CurveCollection};
use super::params::{ScanStrategy, WindowParams};
use crate::dataset::Dataset;
use crate::error::CurveError;

/// Turns a dataset into an ordered curve collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveAggregator {
    params: WindowParams,
    strategy: ScanStrategy,
}

impl CurveAggregator {
    /// Create an aggregator with the full-scan strategy.
    pub fn new(params: WindowParams) -> Self {
        Self {
            params,
            strategy: ScanStrategy::FullScan,
        }
    }

    /// Set the membership strategy.
    pub fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn params(&self) -> WindowParams {
        self.params
    }

    pub fn strategy(&self) -> ScanStrategy {
        self.strategy
    }

    /// Compute the curve collection for `dataset`.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidParameter`] if width or offset is not positive,
    ///   the offset is infinite, or a daily total is infinite
    /// - [`CurveError::EmptyDataset`] if there are no days
    pub fn aggregate(&self, dataset: &Dataset) -> Result<CurveCollection, CurveError> {
        self.params.validate()?;

        let (lo, hi) = dataset.total_range().ok_or(CurveError::EmptyDataset)?;
        for bound in [lo, hi] {
            if bound.is_infinite() {
                return Err(CurveError::InvalidParameter {
                    name: "total_activity",
                    value: bound,
                });
            }
        }

        let totals = dataset.totals();
        let t_min = lo.floor();
        let t_max = hi.ceil();

        let sorted = match self.strategy {
            ScanStrategy::FullScan => None,
            ScanStrategy::SortedIndex => Some(SortedTotals::new(&totals)),
        };

        let mut curves = Vec::new();
        let mut attempted = 0usize;

        for start in self.params.window_starts(t_min, t_max) {
            attempted += 1;
            let window = self.params.window_at(start);

            let members: Vec<usize> = match &sorted {
                None => totals
                    .iter()
                    .enumerate()
                    .filter(|&(_, &t)| window.contains(t))
                    .map(|(i, _)| i)
                    .collect(),
                Some(index) => index.members(window.start, window.end),
            };

            if members.is_empty() {
                tracing::debug!("Window [{}, {}) is empty, skipping", window.start, window.end);
                continue;
            }

            tracing::debug!(
                "Window [{}, {}) averages {} days",
                window.start,
                window.end,
                members.len()
            );
            curves.push(Curve::average(dataset.days(), &members, window));
        }

        tracing::info!(
            "Aggregated {} days into {} curves ({} windows, range [{}, {}], width {}, offset {})",
            dataset.len(),
            curves.len(),
            attempted,
            t_min,
            t_max,
            self.params.window_width,
            self.params.offset
        );

        Ok(CurveCollection::new(curves, self.params, attempted))
    }
}

/// Compute curves with the given parameters and the default strategy.
pub fn aggregate(dataset: &Dataset, params: WindowParams) -> Result<CurveCollection, CurveError> {
    CurveAggregator::new(params).aggregate(dataset)
}

/// Day indices ordered by total activity.
struct SortedTotals {
    order: Vec<usize>,
    totals: Vec<f64>,
}

impl SortedTotals {
    fn new(totals: &[f64]) -> Self {
        // NaN totals never fall inside a window, so they are left out.
        let mut order: Vec<usize> = (0..totals.len()).filter(|&i| !totals[i].is_nan()).collect();
        order.sort_by(|&a, &b| totals[a].partial_cmp(&totals[b]).unwrap_or(Ordering::Equal));
        let sorted = order.iter().map(|&i| totals[i]).collect();
        Self {
            order,
            totals: sorted,
        }
    }

    /// Indices with `start <= total < end`, in dataset order.
    fn members(&self, start: f64, end: f64) -> Vec<usize> {
        let lo = self.totals.partition_point(|&t| t < start);
        let hi = self.totals.partition_point(|&t| t < end);
        if lo >= hi {
            return Vec::new();
        }
        let mut members = self.order[lo..hi].to_vec();
        members.sort_unstable();
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DayRecord, HOURS_PER_DAY};

    /// A day whose whole total sits in the noon bin, so the sum is exact.
    fn day_with_total(total: f64, report: f64) -> DayRecord {
        let mut hourly = [0.0; HOURS_PER_DAY];
        hourly[12] = total;
        DayRecord::new(hourly, report)
    }

    #[test]
    fn rejects_invalid_parameters() {
        let dataset = Dataset::new(vec![day_with_total(100.0, 0.0)]);
        for params in [WindowParams::new(0.0, 20.0), WindowParams::new(150.0, 0.0)] {
            let err = CurveAggregator::new(params).aggregate(&dataset).unwrap_err();
            assert!(matches!(err, CurveError::InvalidParameter { .. }));
        }
    }

    #[test]
    fn rejects_empty_dataset() {
        let err = aggregate(&Dataset::default(), WindowParams::default()).unwrap_err();
        assert_eq!(err, CurveError::EmptyDataset);
    }

    #[test]
    fn parameters_checked_before_dataset() {
        let err = aggregate(&Dataset::default(), WindowParams::new(-1.0, 20.0)).unwrap_err();
        assert!(matches!(err, CurveError::InvalidParameter { .. }));
    }

    #[test]
    fn width_wider_than_range_yields_no_curves() {
        let dataset = Dataset::new(vec![day_with_total(100.0, 0.0), day_with_total(200.0, 1.0)]);
        let curves = aggregate(&dataset, WindowParams::new(150.0, 20.0)).unwrap();
        assert!(curves.is_empty());
        assert_eq!(curves.windows_attempted(), 0);
    }

    #[test]
    fn infinite_width_yields_no_curves() {
        let dataset = Dataset::new(vec![day_with_total(100.0, 0.0), day_with_total(200.0, 1.0)]);
        let curves = aggregate(&dataset, WindowParams::new(f64::INFINITY, 20.0)).unwrap();
        assert!(curves.is_empty());
        assert_eq!(curves.windows_attempted(), 0);
    }

    #[test]
    fn infinite_total_is_rejected() {
        let mut hourly = [0.0; HOURS_PER_DAY];
        hourly[0] = f64::INFINITY;
        let dataset = Dataset::new(vec![DayRecord::new(hourly, 0.0), day_with_total(10.0, 0.0)]);
        let err = aggregate(&dataset, WindowParams::default()).unwrap_err();
        assert!(matches!(
            err,
            CurveError::InvalidParameter { name: "total_activity", .. }
        ));
    }

    #[test]
    fn three_day_scenario() {
        // Totals 100, 100, 500 with w=150, o=20: starts 100..=340.
        let mut first = [0.0; HOURS_PER_DAY];
        first[9] = 60.0;
        first[10] = 40.0;
        let mut second = [0.0; HOURS_PER_DAY];
        second[9] = 20.0;
        second[14] = 80.0;
        let dataset = Dataset::new(vec![
            DayRecord::new(first, 0.0),
            DayRecord::new(second, 0.0),
            day_with_total(500.0, 1.0),
        ]);

        let curves = aggregate(&dataset, WindowParams::default()).unwrap();
        assert_eq!(curves.windows_attempted(), 13);

        let head = &curves.curves()[0];
        assert_eq!(head.window.unwrap().start, 100.0);
        assert_eq!(head.day_count, 2);
        assert_eq!(head.profile[9], 40.0);
        assert_eq!(head.profile[10], 20.0);
        assert_eq!(head.profile[14], 40.0);
        assert_eq!(head.self_report, 0.0);

        // Only [100, 250) reaches the first two days, and no attempted window
        // (last start 340) reaches 500, so every other window is absent.
        assert_eq!(curves.len(), 1);
    }

    #[test]
    fn window_reaching_only_the_high_day_averages_it_alone() {
        let dataset = Dataset::new(vec![
            day_with_total(100.0, 0.0),
            day_with_total(100.0, 0.0),
            day_with_total(499.5, 1.0),
        ]);
        let curves = aggregate(&dataset, WindowParams::new(100.0, 100.0)).unwrap();

        // Starts 100, 200, 300, 400; the middle two hold nobody.
        let starts: Vec<f64> = curves.iter().map(|c| c.window.unwrap().start).collect();
        assert_eq!(starts, vec![100.0, 400.0]);

        let last = curves.curves().last().unwrap();
        assert_eq!(last.window.unwrap().start, 400.0);
        assert_eq!(last.day_count, 1);
        assert_eq!(last.self_report, 1.0);
        assert_eq!(last.profile, dataset.days()[2].hourly);
    }

    #[test]
    fn upper_bound_is_exclusive_and_next_window_includes_it() {
        let dataset = Dataset::new(vec![
            day_with_total(0.0, 0.0),
            day_with_total(120.0, 1.0),
            day_with_total(300.0, 0.0),
        ]);
        let curves = aggregate(&dataset, WindowParams::new(120.0, 60.0)).unwrap();

        let by_start = |s: f64| curves.iter().find(|c| c.window.unwrap().start == s);
        // [0, 120) holds only the zero day.
        assert_eq!(by_start(0.0).unwrap().day_count, 1);
        assert_eq!(by_start(0.0).unwrap().self_report, 0.0);
        // [60, 180) picks up the day at exactly 120.
        assert_eq!(by_start(60.0).unwrap().day_count, 1);
        assert_eq!(by_start(60.0).unwrap().self_report, 1.0);
    }

    #[test]
    fn single_day_curves_equal_that_day() {
        let mut hourly = [0.0; HOURS_PER_DAY];
        hourly[8] = 30.5;
        hourly[13] = 12.25;
        let dataset = Dataset::new(vec![DayRecord::new(hourly, 0.7)]);

        // Range collapses to [42, 43]: one attempted window of width 1.
        let curves = aggregate(&dataset, WindowParams::new(1.0, 0.5)).unwrap();
        assert_eq!(curves.len(), 1);
        assert_eq!(curves.curves()[0].profile, hourly);
        assert_eq!(curves.curves()[0].self_report, 0.7);
    }

    #[test]
    fn sorted_strategy_matches_full_scan() {
        let dataset = Dataset::new(
            [310.0, 45.0, 120.0, 120.0, 260.0, 499.5, 75.0, 180.0]
                .iter()
                .enumerate()
                .map(|(i, &t)| day_with_total(t, i as f64 / 8.0))
                .collect(),
        );
        let params = WindowParams::new(90.0, 15.0);

        let scan = CurveAggregator::new(params).aggregate(&dataset).unwrap();
        let sorted = CurveAggregator::new(params)
            .with_strategy(ScanStrategy::SortedIndex)
            .aggregate(&dataset)
            .unwrap();
        assert_eq!(scan, sorted);
    }

    #[test]
    fn sorted_totals_skip_nan() {
        let index = SortedTotals::new(&[5.0, f64::NAN, 1.0, 3.0]);
        assert_eq!(index.order, vec![2, 3, 0]);
        assert_eq!(index.members(1.0, 5.0), vec![2, 3]);
        assert!(index.members(6.0, 9.0).is_empty());
    }
}
