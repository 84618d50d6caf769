//! Browser Glue
//!
//! Local storage and cookie backends for `Session`, plus the handful of
//! window calls the views need (alert, confirm, new tab, local clock).

use chrono::{DateTime, NaiveDateTime};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Storage};

use picktogether_core::config::MEMBER_COOKIE_MAX_AGE_SECS;
use picktogether_core::session::{KeyValueStore, Session};
use picktogether_core::{ClientError, ClientResult};

/// `window.localStorage`
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let storage = Self::storage().ok_or_else(|| ClientError::Storage("localStorage unavailable".into()))?;
        storage.set_item(key, value).map_err(|e| ClientError::Storage(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(err) = storage.remove_item(key) {
                log::warn!("localStorage {key} not cleared: {err:?}");
            }
        }
    }
}

/// `document.cookie`; values are percent-encoded, one day lifetime, site-wide path.
pub struct CookieJar;

impl CookieJar {
    fn document() -> Option<HtmlDocument> {
        web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
    }

    fn write(raw: &str) -> ClientResult<()> {
        let document = Self::document().ok_or_else(|| ClientError::Storage("document unavailable".into()))?;
        document.set_cookie(raw).map_err(|e| ClientError::Storage(format!("{e:?}")))
    }
}

impl KeyValueStore for CookieJar {
    fn get(&self, key: &str) -> Option<String> {
        let cookies = Self::document()?.cookie().ok()?;
        let value = cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)?;
        percent_decode_str(value).decode_utf8().ok().map(|v| v.into_owned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let encoded = utf8_percent_encode(value, NON_ALPHANUMERIC);
        Self::write(&format!("{key}={encoded}; max-age={MEMBER_COOKIE_MAX_AGE_SECS}; path=/"))
    }

    fn remove(&self, key: &str) {
        if let Err(err) = Self::write(&format!("{key}=; max-age=0; path=/")) {
            log::warn!("cookie {key} not cleared: {err}");
        }
    }
}

pub type BrowserSession = Session<LocalStorage, CookieJar>;

pub fn browser_session() -> BrowserSession {
    Session::new(LocalStorage, CookieJar)
}

/// Wall clock in the browser's local time zone.
pub fn now_local() -> NaiveDateTime {
    let date = js_sys::Date::new_0();
    let local_ms = date.get_time() - date.get_timezone_offset() * 60_000.0;
    DateTime::from_timestamp_millis(local_ms as i64)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.alert_with_message(message) {
            log::warn!("alert failed: {err:?}");
        }
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn open_url(url: &str) {
    if let Some(window) = web_sys::window() {
        if window.open_with_url_and_target(url, "_blank").is_err() {
            log::warn!("could not open {url}");
        }
    }
}
