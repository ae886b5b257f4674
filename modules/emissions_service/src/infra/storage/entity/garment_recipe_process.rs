//! Assembly processes required by a garment type

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "garment_recipe_processes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "garment_type")]
    pub garment_type_id: i64,
    pub process_id: i64,
    pub time: f64,
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
        belongs_to = "super::process_type::Entity",
        from = "Column::ProcessId",
        to = "super::process_type::Column::Id"
    )]
    Process,
}

impl Related<super::garment_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GarmentType.def()
    }
}

impl Related<super::process_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Process.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
