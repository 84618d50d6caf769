//! Chat and Search Endpoints (recommendation service)

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use picktogether_core::chat::{parse_reply, ChatReply, ChatRequest, ChatService};
use picktogether_core::search::{SearchResponse, SearchService};
use picktogether_core::ClientResult;

use super::{get_json, read_text, request, HttpBackend};

#[async_trait(?Send)]
impl ChatService for HttpBackend {
    async fn send(&self, message: &str) -> ClientResult<ChatReply> {
        let body = serde_json::to_string(&ChatRequest { message })?;
        let response = request("POST", &self.config.chat_url("/chat"), Some(body), None).await?;
        parse_reply(&read_text(&response).await?)
    }
}

#[async_trait(?Send)]
impl SearchService for HttpBackend {
    async fn search(&self, query: &str) -> ClientResult<SearchResponse> {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
        get_json(&self.config.chat_url(&format!("/search?query={encoded}")), None).await
    }
}
