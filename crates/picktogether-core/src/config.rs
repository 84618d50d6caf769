//! Runtime Configuration
//!
//! Service base URLs and per-view feed parameters.

use crate::location::Coordinate;

const DEFAULT_BACKEND_BASE: &str = "http://localhost:8080/api";
const DEFAULT_CHAT_BASE: &str = "http://localhost:8000";

/// Local-storage key holding the chosen `{ lat, lng }`.
pub const SELECTED_LOCATION_KEY: &str = "selectedLocation";
/// Cookie holding `{ accessToken, member }`.
pub const MEMBER_COOKIE: &str = "member";
/// Social-login token cleared together with the member cookie.
pub const KAKAO_TOKEN_KEY: &str = "kakaoAccessToken";
/// Member cookie lifetime.
pub const MEMBER_COOKIE_MAX_AGE_SECS: u32 = 86_400;

/// Used by the wishlist view to look up restaurant rows for saved ids.
pub const DEFAULT_COORDINATE: Coordinate = Coordinate { lat: 37.5027, lng: 127.0352 };

/// Base URLs of the two external services.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub backend_base_url: String,
    pub chat_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_BASE.to_string(),
            chat_base_url: DEFAULT_CHAT_BASE.to_string(),
        }
    }
}

impl ApiConfig {
    /// Build-time overrides: `PICKTOGETHER_API_BASE`, `PICKTOGETHER_CHAT_BASE`.
    pub fn from_env() -> Self {
        Self {
            backend_base_url: option_env!("PICKTOGETHER_API_BASE")
                .unwrap_or(DEFAULT_BACKEND_BASE)
                .to_string(),
            chat_base_url: option_env!("PICKTOGETHER_CHAT_BASE")
                .unwrap_or(DEFAULT_CHAT_BASE)
                .to_string(),
        }
    }

    pub fn backend_url(&self, path: &str) -> String {
        join_url(&self.backend_base_url, path)
    }

    pub fn chat_url(&self, path: &str) -> String {
        join_url(&self.chat_base_url, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Fixed search radius and page size of one list view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedParams {
    pub radius_m: u32,
    pub page_size: u32,
}

/// Nearby one-bowl menus.
pub const FOR_ONE_FEED: FeedParams = FeedParams { radius_m: 2_000, page_size: 24 };
/// Nearby restaurants with funding progress.
pub const RESTAURANT_FEED: FeedParams = FeedParams { radius_m: 10_000, page_size: 12 };
/// Restaurant rows fetched for the wishlist join.
pub const WISHLIST_DETAIL_FEED: FeedParams = FeedParams { radius_m: 10_000, page_size: 1_000 };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_normalises_slashes() {
        let config = ApiConfig {
            backend_base_url: "http://api.test/api/".into(),
            chat_base_url: "http://chat.test".into(),
        };
        assert_eq!(config.backend_url("/wishlist"), "http://api.test/api/wishlist");
        assert_eq!(config.backend_url("wishlist/count"), "http://api.test/api/wishlist/count");
        assert_eq!(config.chat_url("/chat"), "http://chat.test/chat");
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.backend_url("/for-one/nearby"), "http://localhost:8080/api/for-one/nearby");
        assert!(DEFAULT_COORDINATE.is_valid());
    }
}
