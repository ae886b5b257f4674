//! Process type entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "process_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::process_resource_consumption::Entity")]
    Consumption,
}

impl Related<super::process_resource_consumption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consumption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
