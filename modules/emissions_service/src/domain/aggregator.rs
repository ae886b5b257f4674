//! Emissions aggregation over a garment's bill of materials
//!
//! Lookup order for one assessment:
//! 1. recipe resolution (fails with `NotFound` before any network call)
//! 2. one token exchange
//! 3. per fabric block unit: material factor, the resource factors of the
//!    type's production processes, then substitute selection and its
//!    preparation/transport breakdown
//! 4. per garment-level process: resource factors
//!
//! Every call runs sequentially. Any upstream failure aborts the assessment.
//! Factors are not cached; repeated activity ids are fetched again.

use super::lca::{AccessToken, LcaProvider};
use super::recipe::{resolve_recipe, resolve_resources};
use super::repository::{CatalogRepository, InventoryRepository};
use super::selector::{select_alternative, ClaimedItems};
use super::storage_failure;
use super::transport::TransportCalculator;
use crate::config::TransportConfig;
use crate::contract::{
    AlternativeDetail, Co2Report, Co2Summary, EmissionsError, FabricBlockDetail,
    FabricBlockEmissions, FabricBlockItem, PreparationDetail, ProcessDetail, ProcessEmissions,
    ResourceDetail,
};

pub struct EmissionsAggregator<'a> {
    catalog: &'a dyn CatalogRepository,
    inventory: &'a dyn InventoryRepository,
    lca: &'a dyn LcaProvider,
    transport: &'a TransportConfig,
}

/// Per-request state: the token and the lazily fetched transport factor
struct Run<'a> {
    token: AccessToken,
    transport: TransportCalculator<'a>,
}

impl<'a> EmissionsAggregator<'a> {
    pub fn new(
        catalog: &'a dyn CatalogRepository,
        inventory: &'a dyn InventoryRepository,
        lca: &'a dyn LcaProvider,
        transport: &'a TransportConfig,
    ) -> Self {
        Self {
            catalog,
            inventory,
            lca,
            transport,
        }
    }

    /// Compute baseline and alternative-sourcing emissions of a garment type
    pub async fn assess(&self, garment_type_id: i64) -> Result<Co2Report, EmissionsError> {
        let (garment_type, recipe) = resolve_recipe(self.catalog, garment_type_id).await?;

        let token = self.lca.fetch_token().await?;
        let mut run = Run {
            token,
            transport: TransportCalculator::new(self.transport),
        };

        let mut fabric_blocks = FabricBlockEmissions::default();
        let mut claimed = ClaimedItems::new();
        for fabric_block in &recipe.fabric_blocks {
            let (detail, next_claimed) = self.fabric_block_unit(&mut run, fabric_block, claimed).await?;
            claimed = next_claimed;
            fabric_blocks.total_emission += detail.emission.unwrap_or(0.0);
            fabric_blocks.total_production_emission += detail.production_emission;
            fabric_blocks.details.push(detail);
        }

        let mut processes = ProcessEmissions::default();
        for (process, time) in &recipe.processes {
            let (resources, emission) = self.process_breakdown(&run.token, process, *time).await?;
            processes.total_emission += emission;
            processes.details.push(ProcessDetail {
                process: process.clone(),
                time: *time,
                resources,
                emission,
            });
        }

        let summary = summarize(&fabric_blocks, &processes);
        tracing::info!(
            garment = %garment_type.name,
            baseline_total = summary.baseline_total,
            alternative_total = summary.alternative_total,
            substitutes = claimed.len(),
            "Computed garment emissions"
        );

        Ok(Co2Report {
            garment_type,
            fabric_blocks,
            processes,
            summary,
        })
    }

    /// Baseline emission of one fabric block unit plus its substitute, if any
    async fn fabric_block_unit(
        &self,
        run: &mut Run<'a>,
        fabric_block: &str,
        claimed: ClaimedItems,
    ) -> Result<(FabricBlockDetail, ClaimedItems), EmissionsError> {
        let block_type = self
            .catalog
            .find_fabric_block_type_by_name(fabric_block)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| EmissionsError::not_found("fabric_block_type", fabric_block))?;

        let amount_kg = block_type.amount_kg.unwrap_or(0.0);
        let factor = self
            .lca
            .emission_factor(block_type.activity_id, &run.token)
            .await?;
        if factor.is_none() {
            tracing::warn!(
                fabric_block = %fabric_block,
                activity_id = block_type.activity_id,
                "No emission factor for material activity"
            );
        }

        let mut production_emission = 0.0;
        for step in &block_type.processes {
            let (_, emission) = self
                .process_breakdown(&run.token, &step.process_name, step.time)
                .await?;
            production_emission += emission;
        }

        let (item, claimed) = select_alternative(self.inventory, fabric_block, claimed).await?;
        let alternative = match item {
            Some(item) => Some(self.alternative(run, &item, block_type.amount_kg).await?),
            None => None,
        };

        let detail = FabricBlockDetail {
            fabric_block: block_type.name,
            material: block_type.material,
            amount_kg,
            activity_id: block_type.activity_id,
            emission: factor.map(|f| f * amount_kg),
            production_emission,
            alternative,
        };
        Ok((detail, claimed))
    }

    /// Preparation and transport emissions still incurred by a substitute
    async fn alternative(
        &self,
        run: &mut Run<'a>,
        item: &FabricBlockItem,
        mass_kg: Option<f64>,
    ) -> Result<AlternativeDetail, EmissionsError> {
        let mut preparations = Vec::with_capacity(item.preparations.len());
        let mut preparation_emission = 0.0;
        for step in &item.preparations {
            let (resources, emission) = self
                .process_breakdown(&run.token, &step.process_name, step.time)
                .await?;
            preparation_emission += emission;
            preparations.push(PreparationDetail {
                process: step.process_name.clone(),
                time: step.time,
                resources,
                emission,
            });
        }

        let distance_km = run.transport.distance_km(item.location.as_ref());
        let transport_emission = run
            .transport
            .contribution(self.lca, &run.token, distance_km, mass_kg)
            .await?;

        Ok(AlternativeDetail {
            id: item.id,
            location: item.location.as_ref().map(|loc| loc.name.clone()),
            distance_km,
            preparations,
            preparation_emission,
            transport_emission,
            emission: preparation_emission + transport_emission,
        })
    }

    /// Resource-level emissions of running a process for `time`
    async fn process_breakdown(
        &self,
        token: &AccessToken,
        process: &str,
        time: f64,
    ) -> Result<(Vec<ResourceDetail>, f64), EmissionsError> {
        let resources = resolve_resources(self.catalog, process).await?;

        let mut details = Vec::with_capacity(resources.len());
        let mut total = 0.0;
        for resource in resources {
            let factor = self.lca.emission_factor(resource.activity_id, token).await?;
            let emission = factor.map(|f| f * resource.amount * time);
            total += emission.unwrap_or(0.0);
            details.push(ResourceDetail {
                resource: resource.name,
                activity_id: resource.activity_id,
                amount: resource.amount,
                emission,
            });
        }
        Ok((details, total))
    }
}

/// Baseline vs. alternative totals. Unknown baseline emissions count as 0.
/// A substitute replaces both the material and the production of its unit.
pub fn summarize(fabric_blocks: &FabricBlockEmissions, processes: &ProcessEmissions) -> Co2Summary {
    let mut summary = Co2Summary {
        baseline_total: fabric_blocks.total_emission
            + fabric_blocks.total_production_emission
            + processes.total_emission,
        alternative_total: processes.total_emission,
        ..Co2Summary::default()
    };

    for detail in &fabric_blocks.details {
        let baseline = detail.emission.unwrap_or(0.0) + detail.production_emission;
        match &detail.alternative {
            Some(alt) => {
                summary.alternative_total += alt.emission;
                summary.avoided_material_emission += baseline;
                summary.remaining_preparation_emission += alt.emission;
                summary.substituted_item_ids.push(alt.id);
            }
            None => summary.alternative_total += baseline,
        }
    }
    summary
}
