//! # API crate: typed access to the StayKonnect REST API
//!
//! This crate is the boundary between the client and the marketplace server.
//! Pricing authority, availability, legal verification and payment settlement
//! all live server-side; this crate only describes and invokes them.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Wire types: `Session`, `User`, `NotificationRecord`, `Property`, `Reservation`, `Payment`, `Review`, `Message` and request bodies |
//! | [`backend`] | One async trait per resource (`AuthBackend`, `NotificationBackend`, ...) so callers can be tested against fakes |
//! | [`error`] | [`ApiError`]: `Auth`, `Validation`, `NotFound`, `Network` |
//!
//! ## REST endpoints implemented by [`HttpApi`]
//!
//! - **Auth**: `POST auth/login`, `POST auth/register`
//! - **Notifications**: `GET notifications/user/{id}`, `PUT notifications/{id}/read`
//! - **Properties**: `GET properties`, `GET properties/{id}`, `GET properties/search`, `POST properties/host/{id}`
//! - **Reservations**: `GET reservations[/{id}|/guest/{id}|/property/{id}]`, `POST reservations`, `PUT reservations/{id}/confirm|cancel`
//! - **Payments**: `POST payments/process`, `PUT payments/{id}/release`
//! - **Reviews**: `GET reviews/property/{id}`, `GET reviews/user/{id}`, `POST reviews`
//! - **Messages**: `GET messages/history`, `POST messages/send`

pub mod backend;
pub mod error;
pub mod models;

mod client;
pub use client::{HttpApi, DEFAULT_BASE_URL};

mod auth;
mod messages;
mod notifications;
mod payments;
mod properties;
mod reservations;
mod reviews;

pub use backend::{
    mock_transaction_id, ApiResult, AuthBackend, MessageBackend, NotificationBackend,
    PaymentBackend, PropertyBackend, ReservationBackend, ReviewBackend,
};
pub use error::ApiError;
pub use models::{
    Credentials, Message, NewProperty, NewReservation, NotificationKind, NotificationRecord,
    Payment, PaymentStatus, Property, PropertySearch, RegisterRequest, Reservation,
    ReservationStatus, Review, Role, Session, User,
};
