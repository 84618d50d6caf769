//! Wishlist Endpoints
//!
//! All calls carry the member's bearer token.

use async_trait::async_trait;

use picktogether_core::session::AccessToken;
use picktogether_core::wishlist::{
    ToggleOutcome, ToggleRequest, WishlistCount, WishlistEntry, WishlistService, WishlistStatus,
};
use picktogether_core::ClientResult;

use super::{get_json, post_json, request, HttpBackend};

#[async_trait(?Send)]
impl WishlistService for HttpBackend {
    async fn list(&self, token: &AccessToken) -> ClientResult<Vec<WishlistEntry>> {
        get_json(&self.config.backend_url("/wishlist"), Some(token)).await
    }

    async fn toggle(&self, token: &AccessToken, restaurant_id: u64) -> ClientResult<ToggleOutcome> {
        let url = self.config.backend_url("/wishlist/toggle");
        post_json(&url, &ToggleRequest { restaurant_id }, Some(token)).await
    }

    async fn remove(&self, token: &AccessToken, restaurant_id: u64) -> ClientResult<()> {
        let url = self.config.backend_url(&format!("/wishlist/{restaurant_id}"));
        request("DELETE", &url, None, Some(token)).await?;
        Ok(())
    }

    async fn check(&self, token: &AccessToken, restaurant_id: u64) -> ClientResult<bool> {
        let url = self.config.backend_url(&format!("/wishlist/check/{restaurant_id}"));
        let status: WishlistStatus = get_json(&url, Some(token)).await?;
        Ok(status.is_wishlisted)
    }

    async fn count(&self, token: &AccessToken) -> ClientResult<u64> {
        let count: WishlistCount = get_json(&self.config.backend_url("/wishlist/count"), Some(token)).await?;
        Ok(count.count)
    }
}
