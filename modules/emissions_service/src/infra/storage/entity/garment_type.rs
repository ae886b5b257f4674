//! Garment type entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "garment_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::garment_recipe_fabric_block::Entity")]
    FabricBlocks,
    #[sea_orm(has_many = "super::garment_recipe_process::Entity")]
    Processes,
}

impl Related<super::garment_recipe_fabric_block::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FabricBlocks.def()
    }
}

impl Related<super::garment_recipe_process::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Processes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
