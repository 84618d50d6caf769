//! Listing Models
//!
//! Response shapes of the nearby-listing endpoints, decoded at the boundary.
//! Required fields fail the decode when absent; optional numbers read as
//! zero wherever they are compared.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An item type served by a paged nearby endpoint.
pub trait Listing: DeserializeOwned + Clone + 'static {
    /// Path under the backend base URL.
    const NEARBY_PATH: &'static str;

    /// Stable key for keyed rendering.
    fn key(&self) -> u64;
}

/// Page envelope `{ content, totalPages, number }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    pub number: u32,
    #[serde(default)]
    pub last: Option<bool>,
}

/// One-bowl funding slot near the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForOneMenu {
    pub slot_id: u64,
    #[serde(default)]
    pub menu_id: Option<u64>,
    pub menu_name: String,
    #[serde(default)]
    pub original_price: Option<i64>,
    #[serde(default)]
    pub funding_price: Option<i64>,
    #[serde(default)]
    pub discount_percent: Option<i64>,
    #[serde(default)]
    pub current_participants: Option<i64>,
    #[serde(default)]
    pub min_participants: Option<i64>,
    #[serde(default)]
    pub max_participants: Option<i64>,
    #[serde(default, with = "timestamp")]
    pub ends_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub restaurant_id: Option<u64>,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default)]
    pub road_address_name: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Listing for ForOneMenu {
    const NEARBY_PATH: &'static str = "/for-one/nearby";

    fn key(&self) -> u64 {
        self.slot_id
    }
}

/// Restaurant card with funding progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantThumb {
    pub restaurant_id: u64,
    pub name: String,
    #[serde(default)]
    pub road_address_name: Option<String>,
    #[serde(default)]
    pub place_url: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub funding_amount: Option<i64>,
    #[serde(default)]
    pub funding_goal_amount: Option<i64>,
    #[serde(default)]
    pub funding_percent: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, with = "timestamp")]
    pub funding_start_date: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp")]
    pub funding_end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_funding_amount: Option<i64>,
}

impl Listing for RestaurantThumb {
    const NEARBY_PATH: &'static str = "/restaurants/nearby";

    fn key(&self) -> u64 {
        self.restaurant_id
    }
}

/// `GET /restaurants/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub road_address_name: Option<String>,
    #[serde(default)]
    pub place_url: Option<String>,
    #[serde(default)]
    pub funding_amount: Option<i64>,
    #[serde(default)]
    pub total_funding_amount: Option<i64>,
    #[serde(default)]
    pub funding_goal_amount: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub business_hours: Option<String>,
    #[serde(default)]
    pub notice: Option<String>,
    #[serde(default, with = "timestamp")]
    pub funding_end_date: Option<NaiveDateTime>,
}

impl RestaurantDetail {
    pub fn total_funded(&self) -> i64 {
        self.funding_amount.unwrap_or(0) + self.total_funding_amount.unwrap_or(0)
    }
}

/// Lenient date/time decoding: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]`.
pub mod timestamp {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    const DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";
    const DATE_TIME_MINUTES: &str = "%Y-%m-%dT%H:%M";

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        NaiveDateTime::parse_from_str(raw, DATE_TIME)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, DATE_TIME_MINUTES))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => s.serialize_some(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_menu_page() {
        let json = r#"{
            "content": [{
                "slotId": 7, "menuName": "김치찌개", "originalPrice": 9000,
                "fundingPrice": 6000, "endsAt": "2025-10-20T18:30:00",
                "distance": 412.7, "restaurantName": "장터"
            }],
            "totalPages": 3, "number": 0
        }"#;
        let page: ListingPage<ForOneMenu> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content[0].key(), 7);
        assert_eq!(page.content[0].funding_price, Some(6000));
        assert!(page.content[0].ends_at.is_some());
        assert!(page.content[0].discount_percent.is_none());
    }

    #[test]
    fn test_decode_fails_closed_on_missing_envelope_fields() {
        let json = r#"{"content": []}"#;
        assert!(serde_json::from_str::<ListingPage<RestaurantThumb>>(json).is_err());
    }

    #[test]
    fn test_decode_fails_closed_on_bad_timestamp() {
        let json = r#"{"restaurantId": 1, "name": "a", "fundingEndDate": "next week"}"#;
        assert!(serde_json::from_str::<RestaurantThumb>(json).is_err());
    }

    #[test]
    fn test_decode_detail() {
        let json = r#"{"id": 5, "name": "장터", "fundingAmount": 1000,
                       "totalFundingAmount": 500, "fundingEndDate": "2025-12-31"}"#;
        let detail: RestaurantDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.total_funded(), 1500);
        assert!(detail.funding_end_date.is_some());
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(timestamp::parse("2025-10-01").is_some());
        assert!(timestamp::parse("2025-10-01T09:15:00").is_some());
        assert!(timestamp::parse("2025-10-01T09:15:00.123456").is_some());
        assert!(timestamp::parse("10/01/2025").is_none());
    }

    #[test]
    fn test_minute_precision_timestamp() {
        let parsed = timestamp::parse("2025-10-20T18:30").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-10-20 18:30:00");

        let json = r#"{"slotId": 3, "menuName": "국밥", "endsAt": "2025-10-20T18:30"}"#;
        let menu: ForOneMenu = serde_json::from_str(json).unwrap();
        assert_eq!(menu.ends_at, Some(parsed));
    }
}
