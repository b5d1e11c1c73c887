//! Day records, datasets and their exchange bundle.

mod bundle;
mod record;

pub use bundle::DatasetBundle;
pub use record::{Dataset, DayRecord, HOURS_PER_DAY, MAX_MINUTES_PER_HOUR};
