//! Housing-stock distribution loading.
//!
//! The distribution is a CSV file of [`HouseholdRecord`] rows. Households
//! are sampled from it with replacement by
//! [`retrofit_agents::create_households`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use retrofit_agents::{HouseholdRecord, read_household_records};
use tracing::info;

use crate::error::EngineError;

/// Read the distribution file at `path`.
pub fn load_distribution(path: &Path) -> Result<Vec<HouseholdRecord>, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_distribution(file, path)?;
    info!(
        path = %path.display(),
        records = records.len(),
        "Household distribution loaded"
    );
    Ok(records)
}

/// Parse distribution CSV; `path` is used in error messages only.
pub fn parse_distribution(
    reader: impl Read,
    path: &Path,
) -> Result<Vec<HouseholdRecord>, EngineError> {
    read_household_records(reader).map_err(|source| EngineError::Distribution {
        path: path.to_path_buf(),
        source,
    })
}
