//! Per-run resource consumption of a process

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "process_resource_consumption")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub process_id: i64,
    pub resource_id: i64,
    pub amount: f64,
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
        belongs_to = "super::resource_type::Entity",
        from = "Column::ResourceId",
        to = "super::resource_type::Column::Id"
    )]
    Resource,
}

impl Related<super::process_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Process.def()
    }
}

impl Related<super::resource_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resource.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
