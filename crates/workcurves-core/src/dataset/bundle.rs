//! Persisted dataset bundle (`data` + `self_reports`).

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::Dataset;
use crate::error::Result;
use crate::storage::{read_json, write_json};

/// On-disk form of a [`Dataset`].
///
/// Field names are part of the exchange format shared by the generator,
/// aggregator and report stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetBundle {
    /// N x 24 matrix of minutes active per hour
    pub data: Vec<Vec<f64>>,
    /// Length-N self-report vector
    pub self_reports: Vec<f64>,
    /// When the bundle was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl DatasetBundle {
    /// Snapshot a dataset, stamping the current time.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let (data, self_reports) = dataset.to_matrix();
        Self {
            data,
            self_reports,
            created_at: Some(Utc::now()),
        }
    }

    /// Validate shape and convert into a dataset.
    pub fn into_dataset(self) -> Result<Dataset> {
        Ok(Dataset::from_matrix(&self.data, &self.self_reports)?)
    }

    /// Write the bundle as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }

    /// Read a bundle from JSON. Shape is not checked until [`into_dataset`].
    ///
    /// [`into_dataset`]: DatasetBundle::into_dataset
    pub fn load_json(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

impl Dataset {
    /// Persist the dataset as a JSON bundle.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        DatasetBundle::from_dataset(self).save_json(path)
    }

    /// Load and shape-check a dataset bundle.
    ///
    /// Hourly values outside [0, 60] are logged, not rejected.
    pub fn load_json(path: &Path) -> Result<Self> {
        let dataset = DatasetBundle::load_json(path)?.into_dataset()?;
        let flagged = dataset.out_of_range_hours();
        if !flagged.is_empty() {
            tracing::warn!(
                "{} hourly values outside [0, 60] in {} (first: day {}, hour {}, value {})",
                flagged.len(),
                path.display(),
                flagged[0].0,
                flagged[0].1,
                flagged[0].2
            );
        }
        tracing::debug!("Loaded {} day records from {}", dataset.len(), path.display());
        Ok(dataset)
    }
}
