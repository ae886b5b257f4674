//! Domain layer - business logic and services

pub mod aggregator;
pub mod lca;
pub mod recipe;
pub mod repository;
pub mod selector;
pub mod service;
pub mod transport;
pub mod validation;

pub use aggregator::EmissionsAggregator;
pub use lca::{AccessToken, LcaProvider, UpstreamError};
pub use repository::{CatalogRepository, InventoryRepository};
pub use selector::ClaimedItems;
pub use service::Service;

use crate::contract::EmissionsError;

/// Log a repository failure and hide it behind `Internal`
pub(crate) fn storage_failure(err: anyhow::Error) -> EmissionsError {
    tracing::error!("Storage error: {:?}", err);
    EmissionsError::Internal
}
