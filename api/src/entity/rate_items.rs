use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rate_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub user_rate_id: i32,
    pub service_type_id: Option<i32>,
    pub source_language_id: Option<i32>,
    pub target_language_id: Option<i32>,
    pub price: Option<f64>,
    pub certificate_id: Option<i32>,
    pub sworn_or_certified: bool,
    pub active: bool,
    pub created_by: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
