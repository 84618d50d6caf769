//! Restaurant Detail Endpoint

use picktogether_core::models::RestaurantDetail;
use picktogether_core::ClientResult;

use super::{get_json, HttpBackend};

impl HttpBackend {
    pub async fn restaurant(&self, id: u64) -> ClientResult<RestaurantDetail> {
        get_json(&self.config.backend_url(&format!("/restaurants/{id}")), None).await
    }
}
