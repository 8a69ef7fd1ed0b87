//! Client core shared by every StayKonnect front-end.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`observable`] | current-value publish/subscribe slot |
//! | [`auth`] | [`SessionStore`]: persisted, observable login session |
//! | [`notifications`] | [`NotificationCache`]: polled notifications and unread count |
//! | [`booking`] | [`quote`]: nights and total for a stay |
//! | [`storage`] | platform session storage constructor |
//!
//! Nothing here is global. Build a [`SessionStore`] over a storage backend,
//! share it through an `Arc`, and hand it to the [`NotificationCache`].

pub mod auth;
pub mod booking;
pub mod notifications;
pub mod observable;
pub mod storage;

pub use auth::{SessionError, SessionStore, SESSION_STORAGE_KEY};
pub use booking::{quote, quote_interval, NotComputable, Quote, StayInterval};
pub use notifications::{
    FetchOutcome, MarkReadOutcome, NotificationCache, NotificationState, DEFAULT_POLL_INTERVAL,
};
pub use observable::{Observable, SubscriptionId};
pub use storage::{default_storage_dir, make_session_storage};
