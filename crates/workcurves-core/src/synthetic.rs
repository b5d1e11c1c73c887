//! Synthetic dataset generation.
//!
//! Produces plausible day records for exercising the aggregator without real
//! activity logs: each day gets a total activity level, a start hour and a
//! block of consecutive working hours carrying that activity with some jitter.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, DayRecord, HOURS_PER_DAY, MAX_MINUTES_PER_HOUR};
use crate::error::CurveError;

/// Configuration for synthetic dataset generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// Number of day records to produce
    pub days: usize,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Lowest total daily activity drawn, in minutes
    pub min_level: f64,

    /// Highest total daily activity drawn, in minutes
    pub max_level: f64,

    /// Earliest hour (0-23) a working day may start
    pub earliest_start: u8,

    /// Latest hour (0-23) a working day may start
    pub latest_start: u8,

    /// Relative per-hour noise (0.0-1.0, exclusive)
    pub jitter: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            days: 500,
            seed: None,
            min_level: 60.0,
            max_level: 600.0,
            earliest_start: 7,
            latest_start: 11,
            jitter: 0.3,
        }
    }
}

impl SyntheticConfig {
    /// Check ranges before generating.
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.days == 0 {
            return Err(CurveError::InvalidParameter {
                name: "days",
                value: 0.0,
            });
        }
        let max_day = HOURS_PER_DAY as f64 * MAX_MINUTES_PER_HOUR;
        if !(self.min_level >= 0.0 && self.min_level <= self.max_level) {
            return Err(CurveError::InvalidParameter {
                name: "min_level",
                value: self.min_level,
            });
        }
        if !(self.max_level <= max_day) {
            return Err(CurveError::InvalidParameter {
                name: "max_level",
                value: self.max_level,
            });
        }
        if self.earliest_start > self.latest_start || self.latest_start as usize >= HOURS_PER_DAY {
            return Err(CurveError::InvalidParameter {
                name: "latest_start",
                value: self.latest_start as f64,
            });
        }
        if !(0.0..1.0).contains(&self.jitter) {
            return Err(CurveError::InvalidParameter {
                name: "jitter",
                value: self.jitter,
            });
        }
        Ok(())
    }
}

/// Seeded generator for synthetic datasets.
pub struct SyntheticGenerator {
    config: SyntheticConfig,
}

impl SyntheticGenerator {
    /// Create a generator with default config.
    pub fn new() -> Self {
        Self {
            config: SyntheticConfig::default(),
        }
    }

    /// Create a generator with custom config.
    pub fn with_config(config: SyntheticConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SyntheticConfig {
        &self.config
    }

    /// Generate a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidParameter`] if the config is out of range.
    pub fn generate(&self) -> Result<Dataset, CurveError> {
        self.config.validate()?;

        let mut rng = match self.config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };

        let profiles: Vec<[f64; HOURS_PER_DAY]> = (0..self.config.days)
            .map(|_| self.generate_profile(&mut rng))
            .collect();

        let reports = normalized_reports(&profiles);
        let days: Vec<DayRecord> = profiles
            .into_iter()
            .zip(reports)
            .map(|(hourly, report)| DayRecord::new(hourly, report))
            .collect();

        tracing::info!(
            "Generated {} synthetic days (seed: {:?})",
            days.len(),
            self.config.seed
        );
        Ok(Dataset::new(days))
    }

    /// One day's hourly profile.
    fn generate_profile<R: Rng>(&self, rng: &mut R) -> [f64; HOURS_PER_DAY] {
        let level = rng.gen_range(self.config.min_level..=self.config.max_level);
        let start = rng.gen_range(self.config.earliest_start..=self.config.latest_start) as usize;

        // Enough hours to hold the level at under a full hour each, plus slack.
        let needed = (level / MAX_MINUTES_PER_HOUR).ceil() as usize + 2;
        let span = needed.min(HOURS_PER_DAY - start).max(1);

        let weights: Vec<f64> = (0..span)
            .map(|_| 1.0 + self.config.jitter * rng.gen_range(-1.0..=1.0))
            .collect();
        let weight_sum: f64 = weights.iter().sum();

        let mut hourly = [0.0; HOURS_PER_DAY];
        for (offset, weight) in weights.iter().enumerate() {
            hourly[start + offset] = (level * weight / weight_sum).clamp(0.0, MAX_MINUTES_PER_HOUR);
        }
        hourly
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Map each day's total linearly onto [0, 1] over the observed total range.
///
/// A dataset whose days all share one total maps every day to 0.0.
fn normalized_reports(profiles: &[[f64; HOURS_PER_DAY]]) -> Vec<f64> {
    let totals: Vec<f64> = profiles.iter().map(|p| p.iter().sum()).collect();
    let lo = totals.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;

    totals
        .iter()
        .map(|&t| if range > 0.0 { (t - lo) / range } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(days: usize, seed: u64) -> SyntheticConfig {
        SyntheticConfig {
            days,
            seed: Some(seed),
            ..SyntheticConfig::default()
        }
    }

    #[test]
    fn generates_requested_day_count() {
        let dataset = SyntheticGenerator::with_config(seeded(50, 7)).generate().unwrap();
        assert_eq!(dataset.len(), 50);
    }

    #[test]
    fn hourly_values_stay_in_bounds() {
        let dataset = SyntheticGenerator::with_config(seeded(200, 11)).generate().unwrap();
        assert!(dataset.out_of_range_hours().is_empty());
    }

    #[test]
    fn self_reports_span_unit_interval() {
        let dataset = SyntheticGenerator::with_config(seeded(100, 3)).generate().unwrap();
        let reports: Vec<f64> = dataset.days().iter().map(|d| d.self_report).collect();

        assert!(reports.iter().all(|&r| (0.0..=1.0).contains(&r)));
        assert!(reports.iter().any(|&r| r == 0.0));
        assert!(reports.iter().any(|&r| r == 1.0));
    }

    #[test]
    fn self_report_order_follows_totals() {
        let dataset = SyntheticGenerator::with_config(seeded(40, 5)).generate().unwrap();
        let mut days: Vec<_> = dataset.days().to_vec();
        days.sort_by(|a, b| a.total_activity().partial_cmp(&b.total_activity()).unwrap());
        for pair in days.windows(2) {
            assert!(pair[0].self_report <= pair[1].self_report);
        }
    }

    #[test]
    fn same_seed_same_dataset() {
        let a = SyntheticGenerator::with_config(seeded(30, 42)).generate().unwrap();
        let b = SyntheticGenerator::with_config(seeded(30, 42)).generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = SyntheticGenerator::with_config(seeded(30, 1)).generate().unwrap();
        let b = SyntheticGenerator::with_config(seeded(30, 2)).generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn activity_starts_no_earlier_than_configured() {
        let config = SyntheticConfig {
            earliest_start: 9,
            latest_start: 9,
            ..seeded(20, 9)
        };
        let dataset = SyntheticGenerator::with_config(config).generate().unwrap();
        for day in dataset.days() {
            assert!(day.hourly[..9].iter().all(|&v| v == 0.0));
            assert!(day.hourly[9] > 0.0);
        }
    }

    #[test]
    fn zero_days_is_invalid() {
        let err = SyntheticGenerator::with_config(seeded(0, 1)).generate().unwrap_err();
        assert!(matches!(err, CurveError::InvalidParameter { name: "days", .. }));
    }

    #[test]
    fn inverted_level_range_is_invalid() {
        let config = SyntheticConfig {
            min_level: 500.0,
            max_level: 100.0,
            ..seeded(10, 1)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn jitter_must_stay_below_one() {
        let config = SyntheticConfig {
            jitter: 1.0,
            ..seeded(10, 1)
        };
        assert!(matches!(
            config.validate(),
            Err(CurveError::InvalidParameter { name: "jitter", .. })
        ));
    }

    #[test]
    fn flat_totals_normalize_to_zero() {
        let reports = normalized_reports(&[[1.0; HOURS_PER_DAY], [1.0; HOURS_PER_DAY]]);
        assert_eq!(reports, vec![0.0, 0.0]);
    }
}
