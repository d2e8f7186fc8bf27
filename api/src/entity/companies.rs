use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub tax_number: Option<String>,
    pub tax_office: Option<String>,
    pub phone: Option<String>,
    pub extension_number: Option<String>,
    pub accounting_email: Option<String>,
    pub address: Option<String>,
    pub authorized_email: Option<String>,
    pub authorized_full_name: Option<String>,
    pub authorized_mobile_phone: Option<String>,
    pub is_contract_price: bool,
    pub is_using_po: bool,
    pub active: bool,
    pub created_by: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_by: Option<i32>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
