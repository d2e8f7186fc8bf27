//! Audit columns shared by every catalogue entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::UserId;

/// Who created/updated a row and whether it is still active
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub active: bool,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Audit {
    /// Audit data for a freshly added row
    pub fn created(actor: UserId) -> Self {
        Self {
            active: true,
            created_by: actor,
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        }
    }

    pub fn touch(&mut self, actor: UserId) {
        self.updated_by = Some(actor);
        self.updated_at = Some(Utc::now());
    }
}
