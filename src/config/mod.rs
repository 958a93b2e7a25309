//! Configuration loading and management for the billing engine.
//!
//! This module loads discount rules, one-time pricing and school holidays
//! from YAML files, and produces the immutable [`BillingParameters`]
//! snapshot a billing run works from.
//!
//! # Example
//!
//! ```no_run
//! use comedor_billing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/comedor").unwrap();
//! println!("Holidays configured: {}", config.holidays().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BillingConfig, BillingParameters, CombinationRule, DiscountConfig, DiscountsFile,
    HolidaysFile, PricingConfig,
};
