use async_trait::async_trait;
use reqwest::Method;

use crate::backend::{ApiResult, ReviewBackend};
use crate::models::Review;
use crate::HttpApi;

#[async_trait]
impl ReviewBackend for HttpApi {
    async fn reviews_for_property(&self, property_id: i64) -> ApiResult<Vec<Review>> {
        let request = self.request(Method::GET, &format!("reviews/property/{property_id}"))?;
        HttpApi::send_json(request).await
    }

    async fn reviews_for_user(&self, user_id: i64) -> ApiResult<Vec<Review>> {
        let request = self.request(Method::GET, &format!("reviews/user/{user_id}"))?;
        HttpApi::send_json(request).await
    }

    async fn create_review(&self, review: &Review) -> ApiResult<Review> {
        let request = self.request(Method::POST, "reviews")?.json(review);
        HttpApi::send_json(request).await
    }
}
