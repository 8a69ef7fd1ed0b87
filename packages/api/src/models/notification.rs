use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A server-issued event notice shown to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl NotificationRecord {
    pub fn kind(&self) -> NotificationKind {
        NotificationKind::from_tag(&self.kind)
    }
}

/// Type tags the server is known to emit. Anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    ReservationRequest,
    ReservationConfirmed,
    NewMessage,
    PaymentReceived,
    Other(String),
}

impl NotificationKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "RESERVATION_REQUEST" => Self::ReservationRequest,
            "RESERVATION_CONFIRMED" => Self::ReservationConfirmed,
            "NEW_MESSAGE" => Self::NewMessage,
            "PAYMENT_RECEIVED" => Self::PaymentReceived,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservationRequest => f.write_str("reservation request"),
            Self::ReservationConfirmed => f.write_str("reservation confirmed"),
            Self::NewMessage => f.write_str("new message"),
            Self::PaymentReceived => f.write_str("payment received"),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}
