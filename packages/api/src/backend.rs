//! Backend contracts consumed by the client core and the views.
//!
//! [`crate::HttpApi`] implements every trait against the REST API; tests
//! substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{
    Credentials, Message, NewProperty, NewReservation, NotificationRecord, Payment, Property,
    PropertySearch, RegisterRequest, Reservation, Review, Session,
};

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a session. Bad credentials are [`ApiError::Auth`].
    async fn login(&self, credentials: &Credentials) -> ApiResult<Session>;

    async fn register(&self, request: &RegisterRequest) -> ApiResult<()>;
}

#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// All notifications of a user, in server order.
    async fn list_for_user(&self, user_id: i64) -> ApiResult<Vec<NotificationRecord>>;

    async fn mark_read(&self, notification_id: i64) -> ApiResult<()>;
}

#[async_trait]
pub trait PropertyBackend: Send + Sync {
    async fn list_properties(&self) -> ApiResult<Vec<Property>>;

    async fn get_property(&self, property_id: i64) -> ApiResult<Property>;

    async fn search_properties(&self, search: &PropertySearch) -> ApiResult<Vec<Property>>;

    async fn create_property(&self, host_id: i64, property: &NewProperty) -> ApiResult<Property>;
}

#[async_trait]
pub trait ReservationBackend: Send + Sync {
    async fn list_reservations(&self) -> ApiResult<Vec<Reservation>>;

    async fn get_reservation(&self, reservation_id: i64) -> ApiResult<Reservation>;

    async fn reservations_for_guest(&self, guest_id: i64) -> ApiResult<Vec<Reservation>>;

    async fn reservations_for_property(&self, property_id: i64) -> ApiResult<Vec<Reservation>>;

    /// The server prices the stay and checks availability.
    async fn create_reservation(
        &self,
        guest_id: i64,
        property_id: i64,
        reservation: &NewReservation,
    ) -> ApiResult<Reservation>;

    async fn confirm_reservation(&self, reservation_id: i64) -> ApiResult<Reservation>;

    async fn cancel_reservation(&self, reservation_id: i64) -> ApiResult<Reservation>;
}

#[async_trait]
pub trait PaymentBackend: Send + Sync {
    async fn process_payment(&self, reservation_id: i64, transaction_id: &str)
        -> ApiResult<Payment>;

    async fn release_funds(&self, payment_id: i64) -> ApiResult<()>;
}

#[async_trait]
pub trait ReviewBackend: Send + Sync {
    async fn reviews_for_property(&self, property_id: i64) -> ApiResult<Vec<Review>>;

    async fn reviews_for_user(&self, user_id: i64) -> ApiResult<Vec<Review>>;

    async fn create_review(&self, review: &Review) -> ApiResult<Review>;
}

#[async_trait]
pub trait MessageBackend: Send + Sync {
    async fn chat_history(&self, user_id: i64, other_user_id: i64) -> ApiResult<Vec<Message>>;

    async fn send_message(
        &self,
        sender_id: i64,
        receiver_id: i64,
        content: &str,
    ) -> ApiResult<Message>;
}

/// Transaction id for the mock payment flow: `MOCK-<uuid v4>`.
pub fn mock_transaction_id() -> String {
    format!("MOCK-{}", uuid::Uuid::new_v4())
}
