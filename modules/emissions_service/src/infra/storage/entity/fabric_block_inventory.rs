//! Inventory of already-produced fabric blocks

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fabric_blocks_inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub type_id: i64,
    pub co2eq: Option<f64>,
    /// Originating garment; not enforced as a foreign key
    pub garment_id: Option<i64>,
    pub location_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fabric_block_type::Entity",
        from = "Column::TypeId",
        to = "super::fabric_block_type::Column::Id"
    )]
    FabricBlockType,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
    #[sea_orm(has_many = "super::preparation_record::Entity")]
    Preparations,
}

impl Related<super::fabric_block_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FabricBlockType.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::preparation_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Preparations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
