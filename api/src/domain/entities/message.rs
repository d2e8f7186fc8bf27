//! Message domain entity
//!
//! Internal mail between users. Sender and recipient each hold their own
//! visibility flag; the row is purged once both sides have deleted it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{MessageId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub title: String,
    pub content: String,
    pub read_date: Option<DateTime<Utc>>,
    /// Visible in the sender's outbox
    pub from_status: bool,
    /// Visible in the recipient's inbox
    pub to_status: bool,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_deleted_by_both(&self) -> bool {
        !self.from_status && !self.to_status
    }
}

/// Data needed to send a message
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub title: String,
    pub content: String,
}

/// Typed filter for message search; unset fields match everything
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageQuery {
    pub from_user_id: Option<UserId>,
    pub to_user_id: Option<UserId>,
    pub unread_only: bool,
}

impl MessageQuery {
    pub fn matches(&self, message: &Message) -> bool {
        self.from_user_id.map_or(true, |id| message.from_user_id == id)
            && self.to_user_id.map_or(true, |id| message.to_user_id == id)
            && (!self.unread_only || message.read_date.is_none())
    }
}
