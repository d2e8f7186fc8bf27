use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub mobile_phone: Option<String>,
    pub password: String,
    pub membership_type_id: i32,
    #[sea_orm(indexed)]
    pub company_id: Option<i32>,
    pub institution_code: Option<String>,
    pub active: bool,
    pub created_by: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_by: Option<i32>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
