//! Customer domain entity
//!
//! Customers are either individuals or employees of a corporate client.

use serde::{Deserialize, Serialize};

use super::audit::Audit;
use super::ids::{CompanyId, CustomerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum MembershipType {
    Personal = 1,
    Corporate = 2,
}

impl TryFrom<i32> for MembershipType {
    type Error = String;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(MembershipType::Personal),
            2 => Ok(MembershipType::Corporate),
            _ => Err(format!("Unknown membership type: {}", id)),
        }
    }
}

impl From<MembershipType> for i32 {
    fn from(membership: MembershipType) -> Self {
        membership as i32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFields {
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(default)]
    pub mobile_phone: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(rename = "membershipTypeId")]
    pub membership_type: MembershipType,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub institution_code: Option<String>,
}

impl CustomerFields {
    /// Personal customers never belong to a company
    pub fn normalized(mut self) -> Self {
        if self.membership_type == MembershipType::Personal {
            self.company_id = None;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    #[serde(flatten)]
    pub fields: CustomerFields,
    #[serde(flatten)]
    pub audit: Audit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personal_customer_drops_company() {
        let fields = CustomerFields {
            name: "Grace".to_string(),
            surname: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            mobile_phone: None,
            password: "secret".to_string(),
            membership_type: MembershipType::Personal,
            company_id: Some(CompanyId(4)),
            institution_code: None,
        };
        assert_eq!(fields.clone().normalized().company_id, None);

        let corporate = CustomerFields {
            membership_type: MembershipType::Corporate,
            ..fields
        };
        assert_eq!(corporate.normalized().company_id, Some(CompanyId(4)));
    }

    #[test]
    fn password_is_accepted_but_never_serialized() {
        let json = r#"{"name": "A", "surname": "B", "email": "a@b.co", "password": "pw", "membershipTypeId": 2, "companyId": 3}"#;
        let fields: CustomerFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.password, "pw");
        assert_eq!(fields.membership_type, MembershipType::Corporate);

        let out = serde_json::to_value(&fields).unwrap();
        assert!(out.get("password").is_none());
        assert_eq!(out["membershipTypeId"], 2);
    }
}
