//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading billing
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::Holiday;

use super::types::{
    BillingConfig, BillingParameters, DiscountsFile, HolidaysFile, PricingConfig,
};

/// Loads and provides access to billing configuration.
///
/// # Directory Structure
///
/// ```text
/// config/comedor/
/// ├── discounts.yaml   # Discount rows, one of them active
/// ├── pricing.yaml     # One-time request price
/// └── holidays.yaml    # School holidays
/// ```
///
/// Loading does not pick the active discount row; that happens per run in
/// [`ConfigLoader::snapshot`], so a missing active row is reported to the
/// run that needs it.
///
/// # Example
///
/// ```no_run
/// use comedor_billing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/comedor").unwrap();
/// let params = loader.snapshot().unwrap();
/// println!("Attendance discount: {}%", params.discount.attendance_discount_pct);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BillingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let discounts = Self::load_yaml::<DiscountsFile>(&path.join("discounts.yaml"))?;
        let pricing = Self::load_yaml::<PricingConfig>(&path.join("pricing.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysFile>(&path.join("holidays.yaml"))?;

        debug!(
            path = %path.display(),
            discount_rows = discounts.discounts.len(),
            holidays = holidays.holidays.len(),
            "Loaded billing configuration"
        );

        Ok(Self::from_config(BillingConfig::new(
            discounts.discounts,
            pricing,
            holidays.holidays,
        )))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: BillingConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying billing configuration.
    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// Returns the configured holidays.
    pub fn holidays(&self) -> &[Holiday] {
        self.config.holidays()
    }

    /// Takes the immutable parameter snapshot for one billing run.
    pub fn snapshot(&self) -> EngineResult<BillingParameters> {
        self.config.snapshot()
    }
}
