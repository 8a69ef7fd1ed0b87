//! Wire models for the marketplace REST API.
//!
//! Field names follow the server's camelCase JSON; timestamps are the server's
//! zone-less local date-times and prices are exact decimals.

mod message;
mod notification;
mod payment;
mod property;
mod reservation;
mod review;
mod user;

pub use message::Message;
pub use notification::{NotificationKind, NotificationRecord};
pub use payment::{Payment, PaymentStatus};
pub use property::{Amenity, LegalStatus, NewProperty, Property, PropertyImage, PropertySearch};
pub use reservation::{NewReservation, Reservation, ReservationStatus};
pub use review::Review;
pub use user::{Credentials, RegisterRequest, Role, Session, User};
