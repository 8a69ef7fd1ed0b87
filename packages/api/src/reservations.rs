use async_trait::async_trait;
use reqwest::Method;

use crate::backend::{ApiResult, ReservationBackend};
use crate::models::{NewReservation, Reservation};
use crate::HttpApi;

#[async_trait]
impl ReservationBackend for HttpApi {
    async fn list_reservations(&self) -> ApiResult<Vec<Reservation>> {
        let request = self.request(Method::GET, "reservations")?;
        HttpApi::send_json(request).await
    }

    async fn get_reservation(&self, reservation_id: i64) -> ApiResult<Reservation> {
        let request = self.request(Method::GET, &format!("reservations/{reservation_id}"))?;
        HttpApi::send_json(request).await
    }

    async fn reservations_for_guest(&self, guest_id: i64) -> ApiResult<Vec<Reservation>> {
        let request = self.request(Method::GET, &format!("reservations/guest/{guest_id}"))?;
        HttpApi::send_json(request).await
    }

    async fn reservations_for_property(&self, property_id: i64) -> ApiResult<Vec<Reservation>> {
        let request =
            self.request(Method::GET, &format!("reservations/property/{property_id}"))?;
        HttpApi::send_json(request).await
    }

    async fn create_reservation(
        &self,
        guest_id: i64,
        property_id: i64,
        reservation: &NewReservation,
    ) -> ApiResult<Reservation> {
        let request = self
            .request(Method::POST, "reservations")?
            .query(&[("guestId", guest_id), ("propertyId", property_id)])
            .json(reservation);
        HttpApi::send_json(request).await
    }

    async fn confirm_reservation(&self, reservation_id: i64) -> ApiResult<Reservation> {
        let request = self
            .request(Method::PUT, &format!("reservations/{reservation_id}/confirm"))?
            .json(&serde_json::json!({}));
        HttpApi::send_json(request).await
    }

    async fn cancel_reservation(&self, reservation_id: i64) -> ApiResult<Reservation> {
        let request = self
            .request(Method::PUT, &format!("reservations/{reservation_id}/cancel"))?
            .json(&serde_json::json!({}));
        HttpApi::send_json(request).await
    }
}
