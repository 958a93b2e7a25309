//! Monthly billing engine for a school cafeteria.
//!
//! This crate resolves, for each child or staff member and calendar month,
//! which business days are billed and at what price, whether attendance and
//! family discounts apply, and the final amount owed.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
