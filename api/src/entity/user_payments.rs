use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub currency_id: Option<i32>,
    pub working_type_id: Option<i32>,
    pub minimum_charge_amount: Option<f64>,
    pub vat_tax_no: Option<String>,
    // Bank account
    pub account_holder_full_name: Option<String>,
    pub account_number: Option<String>,
    pub bank_account_type_id: Option<i32>,
    pub bank_name: Option<String>,
    pub bank_address: Option<String>,
    pub beneficiary_address: Option<String>,
    pub city_country_bank: Option<String>,
    pub iban: Option<String>,
    pub paypal_email_address: Option<String>,
    pub swift_bic_code: Option<String>,
    pub active: bool,
    pub created_by: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_by: Option<i32>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
