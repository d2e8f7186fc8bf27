use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "price_lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub source_language_id: i32,
    pub target_language_id: i32,
    pub char_0_100: f64,
    pub char_100_150: f64,
    pub char_150_200: f64,
    pub char_200_500: f64,
    pub char_500_more: f64,
    pub active: bool,
    pub created_by: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_by: Option<i32>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
