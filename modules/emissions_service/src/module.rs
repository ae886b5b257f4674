//! Module declaration and lifecycle: init, migrate, REST registration

use crate::config::Config;
use crate::contract::EmissionsApi;
use crate::domain::{LcaProvider, Service};
use crate::infra::lca::WiserClient;
use crate::infra::storage::{Migrator, SeaOrmCatalogRepository, SeaOrmInventoryRepository};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Emissions service module
#[derive(Default)]
pub struct EmissionsServiceModule {
    service: RwLock<Option<Arc<Service>>>,
    client: RwLock<Option<Arc<dyn EmissionsApi>>>,
}

impl EmissionsServiceModule {
    /// Wire the service against the WISER LCA client built from `config.lca`
    pub fn init(&self, config: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        let lca = Arc::new(WiserClient::new(config.lca.clone())?);
        self.init_with_provider(config, db, lca)
    }

    /// Wire the service against an arbitrary LCA provider
    pub fn init_with_provider(
        &self,
        config: Config,
        db: Arc<DatabaseConnection>,
        lca: Arc<dyn LcaProvider>,
    ) -> Result<()> {
        tracing::info!(
            api_base = %config.lca.api_base,
            method = %config.lca.method,
            transport_activity = ?config.transport.activity_id,
            "Initializing emissions service"
        );

        let catalog = Arc::new(SeaOrmCatalogRepository::new(db.clone()));
        let inventory = Arc::new(SeaOrmInventoryRepository::new(db));

        let service = Arc::new(Service::new(catalog, inventory, lca, config));
        *self.service.write() = Some(service.clone());

        let client: Arc<dyn EmissionsApi> = Arc::new(crate::api::native::NativeClient::new(service));
        *self.client.write() = Some(client);
        Ok(())
    }

    /// Apply pending schema and seed migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Emissions service migrations completed");
        Ok(())
    }

    /// Mount the REST routes onto `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self
            .service
            .read()
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?
            .clone();

        tracing::info!("Registering emissions service REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn EmissionsApi>> {
        self.client
            .read()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }
}
