use async_trait::async_trait;
use reqwest::Method;

use crate::backend::{ApiResult, NotificationBackend};
use crate::models::NotificationRecord;
use crate::HttpApi;

#[async_trait]
impl NotificationBackend for HttpApi {
    async fn list_for_user(&self, user_id: i64) -> ApiResult<Vec<NotificationRecord>> {
        let request = self.request(Method::GET, &format!("notifications/user/{user_id}"))?;
        HttpApi::send_json(request).await
    }

    async fn mark_read(&self, notification_id: i64) -> ApiResult<()> {
        let request = self
            .request(Method::PUT, &format!("notifications/{notification_id}/read"))?
            .json(&serde_json::json!({}));
        HttpApi::send_empty(request).await
    }
}
