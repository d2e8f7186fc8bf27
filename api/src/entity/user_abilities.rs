use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_abilities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub mother_tongue_id: Option<i32>,
    pub bilingual_tongue_id: Option<i32>,
    pub main_clients: Option<String>,
    pub qualifications: Option<String>,
    pub years_of_experience: Option<i32>,
    pub quality_ensure_description: Option<String>,
    pub translation_capacity: Option<i32>,
    pub review_capacity: Option<i32>,
    pub proofreading_capacity: Option<i32>,
    pub active: bool,
    pub created_by: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_by: Option<i32>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
