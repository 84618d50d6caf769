//! Search
//!
//! Free-text restaurant search served by the recommendation service.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::funding::{days_remaining, funded_percent};
use crate::models::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub funding_amount: Option<i64>,
    #[serde(default)]
    pub funding_goal_amount: Option<i64>,
    #[serde(default, with = "timestamp")]
    pub funding_end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl SearchHit {
    pub fn funded_percent(&self) -> i64 {
        funded_percent(self.funding_amount.unwrap_or(0), self.funding_goal_amount.unwrap_or(0))
    }

    pub fn days_left(&self, now: NaiveDateTime) -> Option<i64> {
        self.funding_end_date.map(|end| days_remaining(end, now))
    }
}

/// `{ results, related_keywords }`, ranked by the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
    #[serde(default)]
    pub related_keywords: Vec<String>,
}

#[async_trait(?Send)]
pub trait SearchService {
    async fn search(&self, query: &str) -> ClientResult<SearchResponse>;
}

/// Run a search; blank queries return nothing without a request.
pub async fn run<S>(service: &S, query: &str) -> ClientResult<SearchResponse>
where
    S: SearchService + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Ok(SearchResponse::default());
    }
    service.search(query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counting {
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl SearchService for Counting {
        async fn search(&self, query: &str) -> ClientResult<SearchResponse> {
            self.calls.set(self.calls.get() + 1);
            Ok(SearchResponse { results: vec![], related_keywords: vec![query.to_string()] })
        }
    }

    #[test]
    fn test_decode_response() {
        let body = r#"{
            "results": [{"id": 3, "name": "장터국밥", "category_name": "한식",
                         "funding_amount": 300, "funding_goal_amount": 1200,
                         "funding_end_date": "2025-11-01"}],
            "related_keywords": ["국밥", "순대국"]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results[0].funded_percent(), 25);
        assert_eq!(response.related_keywords.len(), 2);

        let empty: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.results.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_skips_request() {
        let service = Counting { calls: Cell::new(0) };
        assert!(run(&service, "  ").await.unwrap().results.is_empty());
        assert_eq!(service.calls.get(), 0);

        let response = run(&service, " 국밥 ").await.unwrap();
        assert_eq!(response.related_keywords, vec!["국밥".to_string()]);
        assert_eq!(service.calls.get(), 1);
    }
}
