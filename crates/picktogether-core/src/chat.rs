//! Chat Assistant
//!
//! Transcript state and reply decoding for the recommendation chat service.
//! Quick-reply buttons carry a typed action; `dispatch` is the one place
//! that decides what pressing one does.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::route::Route;

pub const GREETING: &str = "안녕하세요! 무엇을 도와드릴까요?";
pub const CONNECTION_FAILED: &str = "❌ 서버와 연결할 수 없습니다.";

/// Body of `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuickAction {
    Search { query: String },
    Restaurant {
        #[serde(alias = "restaurantId")]
        restaurant_id: u64,
    },
    Nearby,
    Wishlist,
    Message { text: String },
    Link { url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickReply {
    pub label: String,
    pub action: QuickAction,
}

/// Restaurant card embedded in a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRestaurant {
    #[serde(alias = "restaurantId")]
    pub restaurant_id: u64,
    pub name: String,
    #[serde(default, alias = "categoryName")]
    pub category_name: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default, alias = "fundingPercent")]
    pub funding_percent: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub buttons: Vec<QuickReply>,
    pub restaurants: Vec<ChatRestaurant>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireReply {
    Reply {
        response: String,
        #[serde(default)]
        buttons: Vec<QuickReply>,
        #[serde(default)]
        restaurants: Vec<ChatRestaurant>,
    },
    Failure {
        error: String,
    },
}

/// Decode a `/chat` body. `{ error }` bodies and unknown button actions are
/// errors.
pub fn parse_reply(body: &str) -> ClientResult<ChatReply> {
    match serde_json::from_str::<WireReply>(body)? {
        WireReply::Reply { response, buttons, restaurants } => {
            Ok(ChatReply { text: response, buttons, restaurants })
        }
        WireReply::Failure { error } => Err(ClientError::Service(error)),
    }
}

/// What the UI should do for a pressed quick reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEffect {
    Navigate(Route),
    Send(String),
    OpenUrl(String),
}

pub fn dispatch(action: &QuickAction) -> ChatEffect {
    match action {
        QuickAction::Search { query } => ChatEffect::Navigate(Route::Search(query.clone())),
        QuickAction::Restaurant { restaurant_id } => {
            ChatEffect::Navigate(Route::Restaurant(*restaurant_id))
        }
        QuickAction::Nearby => ChatEffect::Navigate(Route::NearbyMenus),
        QuickAction::Wishlist => ChatEffect::Navigate(Route::Wishlist),
        QuickAction::Message { text } => ChatEffect::Send(text.clone()),
        QuickAction::Link { url } => ChatEffect::OpenUrl(url.clone()),
    }
}

#[async_trait(?Send)]
pub trait ChatService {
    async fn send(&self, message: &str) -> ClientResult<ChatReply>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub buttons: Vec<QuickReply>,
    pub restaurants: Vec<ChatRestaurant>,
}

impl ChatMessage {
    fn plain(sender: Sender, text: impl Into<String>) -> Self {
        Self { sender, text: text.into(), buttons: Vec::new(), restaurants: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self { messages: vec![ChatMessage::plain(Sender::Bot, GREETING)], pending: false }
    }
}

impl ChatTranscript {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record the user's line. Returns the text to send, or None for blank
    /// input or while a reply is still pending.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        let text = input.trim();
        if text.is_empty() || self.pending {
            return None;
        }
        self.messages.push(ChatMessage::plain(Sender::User, text));
        self.pending = true;
        Some(text.to_string())
    }

    pub fn finish(&mut self, result: ClientResult<ChatReply>) {
        self.pending = false;
        match result {
            Ok(reply) => self.messages.push(ChatMessage {
                sender: Sender::Bot,
                text: reply.text,
                buttons: reply.buttons,
                restaurants: reply.restaurants,
            }),
            Err(err) => {
                log::warn!("chat: {err}");
                self.messages.push(ChatMessage::plain(Sender::Bot, CONNECTION_FAILED));
            }
        }
    }
}

/// One full exchange.
pub async fn send_message<S>(transcript: &mut ChatTranscript, service: &S, input: &str) -> bool
where
    S: ChatService + ?Sized,
{
    let Some(text) = transcript.begin_send(input) else {
        return false;
    };
    let result = service.send(&text).await;
    transcript.finish(result);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Echo {
        down: Cell<bool>,
    }

    #[async_trait(?Send)]
    impl ChatService for Echo {
        async fn send(&self, message: &str) -> ClientResult<ChatReply> {
            if self.down.get() {
                return Err(ClientError::Network("connection refused".into()));
            }
            Ok(ChatReply { text: format!("echo: {message}"), buttons: vec![], restaurants: vec![] })
        }
    }

    #[test]
    fn test_parse_reply_with_buttons() {
        let body = r#"{
            "response": "근처 한식당을 찾아볼까요?",
            "buttons": [
                {"label": "한식 검색", "action": {"type": "search", "query": "한식"}},
                {"label": "찜 목록", "action": {"type": "wishlist"}},
                {"label": "이 식당", "action": {"type": "restaurant", "restaurantId": 12}}
            ],
            "restaurants": [{"restaurant_id": 12, "name": "장터국밥"}]
        }"#;
        let reply = parse_reply(body).unwrap();
        assert_eq!(reply.buttons.len(), 3);
        assert_eq!(dispatch(&reply.buttons[0].action), ChatEffect::Navigate(Route::Search("한식".into())));
        assert_eq!(dispatch(&reply.buttons[1].action), ChatEffect::Navigate(Route::Wishlist));
        assert_eq!(dispatch(&reply.buttons[2].action), ChatEffect::Navigate(Route::Restaurant(12)));
        assert_eq!(reply.restaurants[0].restaurant_id, 12);
    }

    #[test]
    fn test_plain_reply_and_error_body() {
        assert_eq!(parse_reply(r#"{"response": "네"}"#).unwrap().text, "네");
        assert_eq!(
            parse_reply(r#"{"error": "quota exceeded"}"#),
            Err(ClientError::Service("quota exceeded".into()))
        );
    }

    #[test]
    fn test_unknown_action_fails_closed() {
        let body = r#"{"response": "x", "buttons": [{"label": "?", "action": {"type": "teleport"}}]}"#;
        assert!(matches!(parse_reply(body), Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_exchange() {
        let service = Echo { down: Cell::new(false) };
        let mut transcript = ChatTranscript::default();
        assert_eq!(transcript.messages()[0].text, GREETING);

        assert!(!send_message(&mut transcript, &service, "   ").await);
        assert!(send_message(&mut transcript, &service, " 안녕 ").await);
        let texts: Vec<&str> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec![GREETING, "안녕", "echo: 안녕"]);

        service.down.set(true);
        send_message(&mut transcript, &service, "hello").await;
        assert_eq!(transcript.messages().last().unwrap().text, CONNECTION_FAILED);
        assert!(!transcript.is_pending());
    }

    #[test]
    fn test_no_second_send_while_pending() {
        let mut transcript = ChatTranscript::default();
        assert!(transcript.begin_send("a").is_some());
        assert!(transcript.begin_send("b").is_none());
    }
}
