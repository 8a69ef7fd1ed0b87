use async_trait::async_trait;
use reqwest::Method;

use crate::backend::{ApiResult, PaymentBackend};
use crate::models::Payment;
use crate::HttpApi;

#[async_trait]
impl PaymentBackend for HttpApi {
    async fn process_payment(
        &self,
        reservation_id: i64,
        transaction_id: &str,
    ) -> ApiResult<Payment> {
        let request = self
            .request(Method::POST, "payments/process")?
            .query(&[
                ("reservationId", reservation_id.to_string()),
                ("transactionId", transaction_id.to_string()),
            ])
            .json(&serde_json::json!({}));
        HttpApi::send_json(request).await
    }

    async fn release_funds(&self, payment_id: i64) -> ApiResult<()> {
        let request = self
            .request(Method::PUT, &format!("payments/{payment_id}/release"))?
            .json(&serde_json::json!({}));
        HttpApi::send_empty(request).await
    }
}
