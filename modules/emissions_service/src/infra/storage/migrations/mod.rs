//! Database migrations for the emissions service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_catalog::Migration),
            Box::new(m20250101_000002_create_recipes::Migration),
            Box::new(m20250101_000003_create_inventory::Migration),
            Box::new(m20250101_000004_seed_demo_data::Migration),
        ]
    }
}

fn id_column<T: IntoIden>(iden: T) -> ColumnDef {
    ColumnDef::new(iden)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn reference<F, T>(name: &str, from: (F, F), to: (T, T)) -> ForeignKeyCreateStatement
where
    F: IntoIden + 'static,
    T: IntoIden + 'static,
{
    ForeignKey::create()
        .name(name)
        .from(from.0, from.1)
        .to(to.0, to.1)
        .to_owned()
}

#[derive(DeriveIden)]
enum GarmentTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum FabricBlockTypes {
    Table,
    Id,
    Name,
    Material,
    AmountKg,
    ActivityId,
}

#[derive(DeriveIden)]
enum ProcessTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum ResourceTypes {
    Table,
    Id,
    Name,
    Unit,
    ActivityId,
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
    Name,
}

mod m20250101_000001_create_catalog {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_catalog"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(GarmentTypes::Table)
                        .if_not_exists()
                        .col(id_column(GarmentTypes::Id))
                        .col(ColumnDef::new(GarmentTypes::Name).string().not_null().unique_key())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(FabricBlockTypes::Table)
                        .if_not_exists()
                        .col(id_column(FabricBlockTypes::Id))
                        .col(
                            ColumnDef::new(FabricBlockTypes::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(FabricBlockTypes::Material).string())
                        .col(ColumnDef::new(FabricBlockTypes::AmountKg).double())
                        .col(
                            ColumnDef::new(FabricBlockTypes::ActivityId)
                                .big_integer()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProcessTypes::Table)
                        .if_not_exists()
                        .col(id_column(ProcessTypes::Id))
                        .col(ColumnDef::new(ProcessTypes::Name).string().not_null().unique_key())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ResourceTypes::Table)
                        .if_not_exists()
                        .col(id_column(ResourceTypes::Id))
                        .col(ColumnDef::new(ResourceTypes::Name).string().not_null().unique_key())
                        .col(ColumnDef::new(ResourceTypes::Unit).string())
                        .col(
                            ColumnDef::new(ResourceTypes::ActivityId)
                                .big_integer()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Locations::Table)
                        .if_not_exists()
                        .col(id_column(Locations::Id))
                        .col(ColumnDef::new(Locations::Name).string().not_null().unique_key())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Locations::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ResourceTypes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProcessTypes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(FabricBlockTypes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(GarmentTypes::Table).to_owned())
                .await
        }
    }
}

mod m20250101_000002_create_recipes {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_recipes"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProcessResourceConsumption::Table)
                        .if_not_exists()
                        .col(id_column(ProcessResourceConsumption::Id))
                        .col(
                            ColumnDef::new(ProcessResourceConsumption::ProcessId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessResourceConsumption::ResourceId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessResourceConsumption::Amount)
                                .double()
                                .not_null(),
                        )
                        .foreign_key(&mut reference(
                            "fk_consumption_process",
                            (ProcessResourceConsumption::Table, ProcessResourceConsumption::ProcessId),
                            (ProcessTypes::Table, ProcessTypes::Id),
                        ))
                        .foreign_key(&mut reference(
                            "fk_consumption_resource",
                            (ProcessResourceConsumption::Table, ProcessResourceConsumption::ResourceId),
                            (ResourceTypes::Table, ResourceTypes::Id),
                        ))
                        .to_owned(),
                )
                .await?;

            // At most one consumption row per (process, resource)
            manager
                .create_index(
                    Index::create()
                        .name("idx_consumption_process_resource")
                        .table(ProcessResourceConsumption::Table)
                        .col(ProcessResourceConsumption::ProcessId)
                        .col(ProcessResourceConsumption::ResourceId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(GarmentRecipeFabricBlocks::Table)
                        .if_not_exists()
                        .col(id_column(GarmentRecipeFabricBlocks::Id))
                        .col(
                            ColumnDef::new(GarmentRecipeFabricBlocks::GarmentType)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GarmentRecipeFabricBlocks::FabricBlockId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GarmentRecipeFabricBlocks::Amount)
                                .big_integer()
                                .not_null(),
                        )
                        .foreign_key(&mut reference(
                            "fk_recipe_fabric_block_garment",
                            (GarmentRecipeFabricBlocks::Table, GarmentRecipeFabricBlocks::GarmentType),
                            (GarmentTypes::Table, GarmentTypes::Id),
                        ))
                        .foreign_key(&mut reference(
                            "fk_recipe_fabric_block_type",
                            (GarmentRecipeFabricBlocks::Table, GarmentRecipeFabricBlocks::FabricBlockId),
                            (FabricBlockTypes::Table, FabricBlockTypes::Id),
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(GarmentRecipeProcesses::Table)
                        .if_not_exists()
                        .col(id_column(GarmentRecipeProcesses::Id))
                        .col(
                            ColumnDef::new(GarmentRecipeProcesses::GarmentType)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GarmentRecipeProcesses::ProcessId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(GarmentRecipeProcesses::Time).double().not_null())
                        .foreign_key(&mut reference(
                            "fk_recipe_process_garment",
                            (GarmentRecipeProcesses::Table, GarmentRecipeProcesses::GarmentType),
                            (GarmentTypes::Table, GarmentTypes::Id),
                        ))
                        .foreign_key(&mut reference(
                            "fk_recipe_process_type",
                            (GarmentRecipeProcesses::Table, GarmentRecipeProcesses::ProcessId),
                            (ProcessTypes::Table, ProcessTypes::Id),
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(FabricBlockRecipeProcesses::Table)
                        .if_not_exists()
                        .col(id_column(FabricBlockRecipeProcesses::Id))
                        .col(
                            ColumnDef::new(FabricBlockRecipeProcesses::FabricBlockType)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FabricBlockRecipeProcesses::ProcessId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FabricBlockRecipeProcesses::Time)
                                .double()
                                .not_null(),
                        )
                        .foreign_key(&mut reference(
                            "fk_fabric_block_process_type",
                            (FabricBlockRecipeProcesses::Table, FabricBlockRecipeProcesses::FabricBlockType),
                            (FabricBlockTypes::Table, FabricBlockTypes::Id),
                        ))
                        .foreign_key(&mut reference(
                            "fk_fabric_block_process_process",
                            (FabricBlockRecipeProcesses::Table, FabricBlockRecipeProcesses::ProcessId),
                            (ProcessTypes::Table, ProcessTypes::Id),
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_recipe_fabric_blocks_garment")
                        .table(GarmentRecipeFabricBlocks::Table)
                        .col(GarmentRecipeFabricBlocks::GarmentType)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_recipe_processes_garment")
                        .table(GarmentRecipeProcesses::Table)
                        .col(GarmentRecipeProcesses::GarmentType)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FabricBlockRecipeProcesses::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(GarmentRecipeProcesses::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(GarmentRecipeFabricBlocks::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProcessResourceConsumption::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProcessResourceConsumption {
        Table,
        Id,
        ProcessId,
        ResourceId,
        Amount,
    }

    #[derive(DeriveIden)]
    enum GarmentRecipeFabricBlocks {
        Table,
        Id,
        GarmentType,
        FabricBlockId,
        Amount,
    }

    #[derive(DeriveIden)]
    enum GarmentRecipeProcesses {
        Table,
        Id,
        GarmentType,
        ProcessId,
        Time,
    }

    #[derive(DeriveIden)]
    enum FabricBlockRecipeProcesses {
        Table,
        Id,
        FabricBlockType,
        ProcessId,
        Time,
    }
}

mod m20250101_000003_create_inventory {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_inventory"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(FabricBlocksInventory::Table)
                        .if_not_exists()
                        .col(id_column(FabricBlocksInventory::Id))
                        .col(
                            ColumnDef::new(FabricBlocksInventory::TypeId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FabricBlocksInventory::Co2eq).double())
                        .col(ColumnDef::new(FabricBlocksInventory::GarmentId).big_integer())
                        .col(ColumnDef::new(FabricBlocksInventory::LocationId).big_integer())
                        .foreign_key(&mut reference(
                            "fk_inventory_type",
                            (FabricBlocksInventory::Table, FabricBlocksInventory::TypeId),
                            (FabricBlockTypes::Table, FabricBlockTypes::Id),
                        ))
                        .foreign_key(&mut reference(
                            "fk_inventory_location",
                            (FabricBlocksInventory::Table, FabricBlocksInventory::LocationId),
                            (Locations::Table, Locations::Id),
                        ))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_inventory_type_id")
                        .table(FabricBlocksInventory::Table)
                        .col(FabricBlocksInventory::TypeId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PreparationsUsedFabricBlocks::Table)
                        .if_not_exists()
                        .col(id_column(PreparationsUsedFabricBlocks::Id))
                        .col(
                            ColumnDef::new(PreparationsUsedFabricBlocks::TypeId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PreparationsUsedFabricBlocks::Time)
                                .double()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PreparationsUsedFabricBlocks::FabricBlockId)
                                .big_integer()
                                .not_null(),
                        )
                        .foreign_key(&mut reference(
                            "fk_preparation_process",
                            (PreparationsUsedFabricBlocks::Table, PreparationsUsedFabricBlocks::TypeId),
                            (ProcessTypes::Table, ProcessTypes::Id),
                        ))
                        .foreign_key(&mut reference(
                            "fk_preparation_fabric_block",
                            (
                                PreparationsUsedFabricBlocks::Table,
                                PreparationsUsedFabricBlocks::FabricBlockId,
                            ),
                            (FabricBlocksInventory::Table, FabricBlocksInventory::Id),
                        ))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PreparationsUsedFabricBlocks::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(FabricBlocksInventory::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum FabricBlocksInventory {
        Table,
        Id,
        TypeId,
        Co2eq,
        GarmentId,
        LocationId,
    }

    #[derive(DeriveIden)]
    enum PreparationsUsedFabricBlocks {
        Table,
        Id,
        TypeId,
        Time,
        FabricBlockId,
    }
}

/// Demo catalog: two garments built from two fabric blocks
mod m20250101_000004_seed_demo_data {
    use super::*;
    use crate::infra::storage::entity::{
        fabric_block_recipe_process, fabric_block_type, garment_recipe_fabric_block,
        garment_recipe_process, garment_type, location, process_resource_consumption,
        process_type, resource_type,
    };
    use sea_orm_migration::sea_orm::{
        ActiveModelTrait,
        ActiveValue::{NotSet, Set},
        ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    };

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_seed_demo_data"
        }
    }

    async fn garment<C: ConnectionTrait>(db: &C, name: &str) -> Result<i64, DbErr> {
        let model = garment_type::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(db)
        .await?;
        Ok(model.id)
    }

    async fn process<C: ConnectionTrait>(db: &C, name: &str) -> Result<i64, DbErr> {
        let model = process_type::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(db)
        .await?;
        Ok(model.id)
    }

    async fn resource<C: ConnectionTrait>(
        db: &C,
        name: &str,
        unit: &str,
        activity_id: i64,
    ) -> Result<i64, DbErr> {
        let model = resource_type::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            unit: Set(Some(unit.to_string())),
            activity_id: Set(activity_id),
        }
        .insert(db)
        .await?;
        Ok(model.id)
    }

    async fn fabric_block<C: ConnectionTrait>(
        db: &C,
        name: &str,
        material: &str,
        amount_kg: f64,
        activity_id: i64,
    ) -> Result<i64, DbErr> {
        let model = fabric_block_type::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            material: Set(Some(material.to_string())),
            amount_kg: Set(Some(amount_kg)),
            activity_id: Set(activity_id),
        }
        .insert(db)
        .await?;
        Ok(model.id)
    }

    async fn consumes<C: ConnectionTrait>(
        db: &C,
        process_id: i64,
        resource_id: i64,
        amount: f64,
    ) -> Result<(), DbErr> {
        process_resource_consumption::ActiveModel {
            id: NotSet,
            process_id: Set(process_id),
            resource_id: Set(resource_id),
            amount: Set(amount),
        }
        .insert(db)
        .await?;
        Ok(())
    }

    async fn needs_blocks<C: ConnectionTrait>(
        db: &C,
        garment_type_id: i64,
        fabric_block_id: i64,
        amount: i64,
    ) -> Result<(), DbErr> {
        garment_recipe_fabric_block::ActiveModel {
            id: NotSet,
            garment_type_id: Set(garment_type_id),
            fabric_block_id: Set(fabric_block_id),
            amount: Set(amount),
        }
        .insert(db)
        .await?;
        Ok(())
    }

    async fn assembled_by<C: ConnectionTrait>(
        db: &C,
        garment_type_id: i64,
        process_id: i64,
        time: f64,
    ) -> Result<(), DbErr> {
        garment_recipe_process::ActiveModel {
            id: NotSet,
            garment_type_id: Set(garment_type_id),
            process_id: Set(process_id),
            time: Set(time),
        }
        .insert(db)
        .await?;
        Ok(())
    }

    async fn produced_by<C: ConnectionTrait>(
        db: &C,
        fabric_block_type_id: i64,
        process_id: i64,
        time: f64,
    ) -> Result<(), DbErr> {
        fabric_block_recipe_process::ActiveModel {
            id: NotSet,
            fabric_block_type_id: Set(fabric_block_type_id),
            process_id: Set(process_id),
            time: Set(time),
        }
        .insert(db)
        .await?;
        Ok(())
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let db = manager.get_connection();

            let crop_top = garment(db, "Crop Top").await?;
            let skirt = garment(db, "Skirt").await?;

            let sewing = process(db, "sewing").await?;
            let washing = process(db, "washing").await?;
            let dyeing = process(db, "dyeing").await?;

            let electricity = resource(db, "electricity", "kWh", 6566).await?;
            let water = resource(db, "water", "L", 20642).await?;

            consumes(db, sewing, electricity, 1.0).await?;
            consumes(db, washing, water, 5.0).await?;
            consumes(db, washing, electricity, 2.0).await?;
            consumes(db, dyeing, water, 10.0).await?;

            let fb1 = fabric_block(db, "FB1", "cotton", 1.5, 3878).await?;
            let fb2 = fabric_block(db, "FB2", "polyester", 1.2, 5544).await?;

            produced_by(db, fb1, dyeing, 2.0).await?;
            produced_by(db, fb2, washing, 1.0).await?;

            needs_blocks(db, crop_top, fb1, 2).await?;
            needs_blocks(db, crop_top, fb2, 1).await?;
            assembled_by(db, crop_top, sewing, 1.0).await?;
            assembled_by(db, crop_top, washing, 3.0).await?;

            needs_blocks(db, skirt, fb1, 1).await?;
            needs_blocks(db, skirt, fb2, 2).await?;
            assembled_by(db, skirt, sewing, 1.0).await?;
            assembled_by(db, skirt, dyeing, 2.0).await?;

            for name in ["Bucharest", "Sigmaringen", "St. Gallen"] {
                location::ActiveModel {
                    id: NotSet,
                    name: Set(name.to_string()),
                }
                .insert(db)
                .await?;
            }

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let db = manager.get_connection();

            // Recipe rows first, the catalog rows they reference after
            for name in ["Crop Top", "Skirt"] {
                if let Some(garment) = garment_type::Entity::find()
                    .filter(garment_type::Column::Name.eq(name))
                    .one(db)
                    .await?
                {
                    garment_recipe_fabric_block::Entity::delete_many()
                        .filter(garment_recipe_fabric_block::Column::GarmentTypeId.eq(garment.id))
                        .exec(db)
                        .await?;
                    garment_recipe_process::Entity::delete_many()
                        .filter(garment_recipe_process::Column::GarmentTypeId.eq(garment.id))
                        .exec(db)
                        .await?;
                    garment_type::Entity::delete_by_id(garment.id).exec(db).await?;
                }
            }

            fabric_block_recipe_process::Entity::delete_many().exec(db).await?;
            fabric_block_type::Entity::delete_many()
                .filter(fabric_block_type::Column::Name.is_in(["FB1", "FB2"]))
                .exec(db)
                .await?;
            process_resource_consumption::Entity::delete_many().exec(db).await?;
            process_type::Entity::delete_many()
                .filter(process_type::Column::Name.is_in(["sewing", "washing", "dyeing"]))
                .exec(db)
                .await?;
            resource_type::Entity::delete_many()
                .filter(resource_type::Column::Name.is_in(["electricity", "water"]))
                .exec(db)
                .await?;
            location::Entity::delete_many()
                .filter(location::Column::Name.is_in(["Bucharest", "Sigmaringen", "St. Gallen"]))
                .exec(db)
                .await?;

            Ok(())
        }
    }
}
