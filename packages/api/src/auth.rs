use async_trait::async_trait;
use reqwest::Method;

use crate::backend::{ApiResult, AuthBackend};
use crate::models::{Credentials, RegisterRequest, Session};
use crate::HttpApi;

#[async_trait]
impl AuthBackend for HttpApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        let request = self.request(Method::POST, "auth/login")?.json(credentials);
        HttpApi::send_json(request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        let request = self.request(Method::POST, "auth/register")?.json(request);
        HttpApi::send_empty(request).await
    }
}
