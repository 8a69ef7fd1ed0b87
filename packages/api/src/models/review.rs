use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Property, User};

/// A guest review of a stay. Only `rating`, `comment` and `reservation_id`
/// are needed when creating one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_property: Option<Property>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_user: Option<User>,
    pub rating: u8,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Review {
    pub fn new(reservation_id: i64, rating: u8, comment: impl Into<String>) -> Self {
        Self {
            id: None,
            reservation_id: Some(reservation_id),
            author: None,
            target_property: None,
            target_user: None,
            rating,
            comment: comment.into(),
            created_at: None,
        }
    }
}
