//! Client-side Session State
//!
//! Single typed accessor over the two browser stores the storefront uses:
//! local storage (chosen location, social token) and the `member` cookie
//! (access token + profile). Views go through `Session` instead of reading
//! storage keys themselves.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{KAKAO_TOKEN_KEY, MEMBER_COOKIE, SELECTED_LOCATION_KEY};
use crate::error::{ClientError, ClientResult};
use crate::location::{resolve_location, Coordinate};

/// String key/value storage (local storage, cookies, memory).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str);
}

/// Process-local store for tests and non-browser targets.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Bearer token; never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Profile stored next to the token.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub social_type: Option<String>,
    #[serde(default)]
    pub role_names: Vec<String>,
}

/// Cookie payload `{ accessToken, member }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSession {
    pub access_token: String,
    #[serde(default)]
    pub member: Option<MemberInfo>,
}

pub struct Session<L, C> {
    local: L,
    cookies: C,
}

impl<L: KeyValueStore, C: KeyValueStore> Session<L, C> {
    pub fn new(local: L, cookies: C) -> Self {
        Self { local, cookies }
    }

    /// Raw JSON under the selected-location key.
    pub fn raw_location(&self) -> Option<String> {
        self.local.get(SELECTED_LOCATION_KEY)
    }

    pub fn selected_location(&self) -> ClientResult<Coordinate> {
        resolve_location(self.raw_location().as_deref())
    }

    pub fn set_selected_location(&self, coordinate: Coordinate) -> ClientResult<()> {
        if !coordinate.is_valid() {
            return Err(ClientError::MalformedLocation("non-finite coordinate".into()));
        }
        self.local.set(SELECTED_LOCATION_KEY, &coordinate.to_storage_json())
    }

    /// The logged-in member, if the cookie holds a usable payload. Read
    /// only; an unreadable cookie is left for the login flow to replace.
    pub fn member(&self) -> Option<MemberSession> {
        let raw = self.cookies.get(MEMBER_COOKIE)?;
        match serde_json::from_str::<MemberSession>(&raw) {
            Ok(session) if !session.access_token.is_empty() => Some(session),
            Ok(_) => None,
            Err(err) => {
                log::warn!("session: unreadable member cookie: {err}");
                None
            }
        }
    }

    pub fn access_token(&self) -> ClientResult<AccessToken> {
        self.member()
            .map(|m| AccessToken(m.access_token))
            .ok_or(ClientError::AuthRequired)
    }

    pub fn login(&self, session: &MemberSession) -> ClientResult<()> {
        let json = serde_json::to_string(session)?;
        self.cookies.set(MEMBER_COOKIE, &json)
    }

    pub fn logout(&self) {
        self.cookies.remove(MEMBER_COOKIE);
        self.local.remove(KAKAO_TOKEN_KEY);
    }
}
