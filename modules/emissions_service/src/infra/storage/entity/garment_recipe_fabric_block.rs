//! Fabric blocks required by a garment type

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "garment_recipe_fabric_blocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "garment_type")]
    pub garment_type_id: i64,
    pub fabric_block_id: i64,
    pub amount: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::garment_type::Entity",
        from = "Column::GarmentTypeId",
        to = "super::garment_type::Column::Id"
    )]
    GarmentType,
    #[sea_orm(
        belongs_to = "super::fabric_block_type::Entity",
        from = "Column::FabricBlockId",
        to = "super::fabric_block_type::Column::Id"
    )]
    FabricBlockType,
}

impl Related<super::garment_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GarmentType.def()
    }
}

impl Related<super::fabric_block_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FabricBlockType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
