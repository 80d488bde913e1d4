//! Stockroom module
//!
//! Two independent resources, inventory items and clock-in records, stored in a
//! document database and served over a JSON REST surface.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod module;
pub use module::StockroomModule;

pub mod config;
pub use config::StoreConfig;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod errors;
#[doc(hidden)]
pub mod infra;
