//! Preparation applied to an inventory item

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "preparations_used_fabric_blocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "type_id")]
    pub process_id: i64,
    pub time: f64,
    pub fabric_block_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::process_type::Entity",
        from = "Column::ProcessId",
        to = "super::process_type::Column::Id"
    )]
    Process,
    #[sea_orm(
        belongs_to = "super::fabric_block_inventory::Entity",
        from = "Column::FabricBlockId",
        to = "super::fabric_block_inventory::Column::Id"
    )]
    FabricBlock,
}

impl Related<super::process_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Process.def()
    }
}

impl Related<super::fabric_block_inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FabricBlock.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
