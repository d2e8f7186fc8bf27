use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_rates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub dtp_rate: Option<f64>,
    pub glossary_creation_rate: Option<f64>,
    pub linguistic_testing_rate: Option<f64>,
    pub review_lqa_rate: Option<f64>,
    pub review_sme_rate: Option<f64>,
    pub terminology_extraction_rate: Option<f64>,
    pub translation_memory_management_rate: Option<f64>,
    pub active: bool,
    pub created_by: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_by: Option<i32>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
