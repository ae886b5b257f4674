//! Preparation processes of a fabric block type

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fabric_block_recipe_processes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "fabric_block_type")]
    pub fabric_block_type_id: i64,
    pub process_id: i64,
    pub time: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fabric_block_type::Entity",
        from = "Column::FabricBlockTypeId",
        to = "super::fabric_block_type::Column::Id"
    )]
    FabricBlockType,
    #[sea_orm(
        belongs_to = "super::process_type::Entity",
        from = "Column::ProcessId",
        to = "super::process_type::Column::Id"
    )]
    Process,
}

impl Related<super::fabric_block_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FabricBlockType.def()
    }
}

impl Related<super::process_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Process.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
