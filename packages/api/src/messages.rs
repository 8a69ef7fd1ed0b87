use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;

use crate::backend::{ApiResult, MessageBackend};
use crate::models::Message;
use crate::HttpApi;

#[async_trait]
impl MessageBackend for HttpApi {
    async fn chat_history(&self, user_id: i64, other_user_id: i64) -> ApiResult<Vec<Message>> {
        let request = self
            .request(Method::GET, "messages/history")?
            .query(&[("user1Id", user_id), ("user2Id", other_user_id)]);
        HttpApi::send_json(request).await
    }

    /// The server takes the message text as the raw request body.
    async fn send_message(
        &self,
        sender_id: i64,
        receiver_id: i64,
        content: &str,
    ) -> ApiResult<Message> {
        let request = self
            .request(Method::POST, "messages/send")?
            .query(&[("senderId", sender_id), ("receiverId", receiver_id)])
            .header(CONTENT_TYPE, "text/plain")
            .body(content.to_string());
        HttpApi::send_json(request).await
    }
}
