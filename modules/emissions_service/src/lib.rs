//! Emissions Service Module
//!
//! CO2-equivalent assessment of garments from their bill of materials, with
//! second-hand fabric blocks from the inventory substituted for virgin ones.
//! Emission factors come from an external LCA database.

// Public exports
pub mod contract;
pub use contract::{client::EmissionsApi, error::EmissionsError, Co2Report, Co2Summary};

pub mod module;
pub use module::EmissionsServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
