//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use crate::domain::entities::{
    Audit, Company, CompanyFields, CompanyId, CustomerFields, Language, LanguageFields,
    LanguageId, MembershipType, NewMessage, Order, OrderId, PriceListFields, ReferenceItem,
    ReferenceItemId, ReferenceKind, Terminology, TerminologyFields, TerminologyId, User,
    UserFields, UserId, UserRole, UserRoleId, UserRoleType, UserScore,
};

use super::mocks::StoredReferenceItem;

/// Create an active test user with default values
pub fn test_user() -> User {
    test_user_with_password(1, "test.user@example.com", "password")
}

/// Create an active user with a specific login
pub fn test_user_with_password(id: i32, email: &str, password: &str) -> User {
    User {
        id: UserId(id),
        fields: UserFields {
            name: "Test".to_string(),
            surname: "User".to_string(),
            email: email.to_string(),
            mobile_phone: None,
            gender_id: None,
            birth_date: None,
        },
        password: password.to_string(),
        password_retry_count: 0,
        roles: Vec::new(),
        score: None,
        audit: Audit::created(UserId(1)),
    }
}

/// Create a user holding the given roles and the same average in every score
pub fn test_user_with_roles(id: i32, roles: &[UserRoleType], score: f64) -> User {
    let mut user = test_user_with_password(id, &format!("user{}@example.com", id), "password");
    user.roles = roles
        .iter()
        .enumerate()
        .map(|(i, role)| UserRole {
            id: UserRoleId(id * 10 + i as i32),
            role: *role,
            active: true,
            created_by: UserId(1),
        })
        .collect();
    user.score = Some(UserScore {
        average_translating_score: score,
        average_editing_score: score,
        average_proofreading_score: score,
    });
    user
}

pub fn test_order(id: i32, translation_quality_id: i32) -> Order {
    Order {
        id: OrderId(id),
        translation_quality_id,
    }
}

pub fn test_company_fields(name: &str) -> CompanyFields {
    CompanyFields {
        name: name.to_string(),
        tax_number: Some("1234567890".to_string()),
        tax_office: Some("Central".to_string()),
        accounting_email: Some("accounting@example.com".to_string()),
        ..Default::default()
    }
}

pub fn test_company(id: i32, name: &str) -> Company {
    Company {
        id: CompanyId(id),
        fields: test_company_fields(name),
        audit: Audit::created(UserId(1)),
    }
}

pub fn test_language(id: i32, name: &str) -> Language {
    Language {
        id: LanguageId(id),
        fields: LanguageFields {
            name: name.to_string(),
        },
        audit: Audit::created(UserId(1)),
    }
}

pub fn test_terminology(id: i32, name: &str) -> Terminology {
    Terminology {
        id: TerminologyId(id),
        fields: TerminologyFields {
            name: name.to_string(),
        },
        audit: Audit::created(UserId(1)),
    }
}

pub fn test_price_list_fields(source: i32, target: i32) -> PriceListFields {
    PriceListFields {
        source_language_id: LanguageId(source),
        target_language_id: LanguageId(target),
        char_0_100: 0.10,
        char_100_150: 0.09,
        char_150_200: 0.08,
        char_200_500: 0.07,
        char_500_more: 0.05,
    }
}

pub fn test_customer_fields(membership_type: MembershipType) -> CustomerFields {
    CustomerFields {
        name: "Grace".to_string(),
        surname: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        mobile_phone: Some("+90 555 000 0000".to_string()),
        password: "secret".to_string(),
        membership_type,
        company_id: None,
        institution_code: None,
    }
}

pub fn test_new_message(from: i32, to: i32) -> NewMessage {
    NewMessage {
        from_user_id: UserId(from),
        to_user_id: UserId(to),
        title: "Deadline".to_string(),
        content: "Please deliver the file by Friday.".to_string(),
    }
}

/// An active lookup row
pub fn test_reference_item(
    id: i32,
    kind: ReferenceKind,
    name: &str,
    parent_id: Option<i32>,
) -> StoredReferenceItem {
    StoredReferenceItem {
        kind,
        active: true,
        item: ReferenceItem {
            id: ReferenceItemId(id),
            name: name.to_string(),
            code: None,
            parent_id: parent_id.map(ReferenceItemId),
        },
    }
}
