use async_trait::async_trait;
use reqwest::Method;

use crate::backend::{ApiResult, PropertyBackend};
use crate::models::{NewProperty, Property, PropertySearch};
use crate::HttpApi;

#[async_trait]
impl PropertyBackend for HttpApi {
    async fn list_properties(&self) -> ApiResult<Vec<Property>> {
        let request = self.request(Method::GET, "properties")?;
        HttpApi::send_json(request).await
    }

    async fn get_property(&self, property_id: i64) -> ApiResult<Property> {
        let request = self.request(Method::GET, &format!("properties/{property_id}"))?;
        HttpApi::send_json(request).await
    }

    async fn search_properties(&self, search: &PropertySearch) -> ApiResult<Vec<Property>> {
        let request = self
            .request(Method::GET, "properties/search")?
            .query(&search.query_pairs());
        HttpApi::send_json(request).await
    }

    async fn create_property(&self, host_id: i64, property: &NewProperty) -> ApiResult<Property> {
        let request = self
            .request(Method::POST, &format!("properties/host/{host_id}"))?
            .json(property);
        HttpApi::send_json(request).await
    }
}
