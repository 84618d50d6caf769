//! Backend HTTP Wrappers
//!
//! Frontend bindings to the storefront backend and the chat service,
//! organized by domain. Every call goes through `send`, which turns
//! transport failures and non-2xx statuses into `ClientError`.

mod chat;
mod listing;
mod restaurant;
mod wishlist;

use std::sync::Arc;

use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use picktogether_core::config::ApiConfig;
use picktogether_core::session::AccessToken;
use picktogether_core::{ClientError, ClientResult};

pub use listing::spawn_page_fetch;

/// Handle to both external services; cheap to clone.
#[derive(Clone)]
pub struct HttpBackend {
    config: Arc<ApiConfig>,
}

impl HttpBackend {
    pub fn new(config: ApiConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}

/// Get the backend handle from context
pub fn use_backend() -> HttpBackend {
    expect_context::<HttpBackend>()
}

fn js_error(err: JsValue) -> ClientError {
    ClientError::Network(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

async fn request(
    method: &str,
    url: &str,
    body: Option<String>,
    token: Option<&AccessToken>,
) -> ClientResult<Response> {
    let window = web_sys::window().ok_or_else(|| ClientError::Network("no window".into()))?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(&body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    let headers = request.headers();
    headers.set("Content-Type", "application/json").map_err(js_error)?;
    if let Some(token) = token {
        headers.set("Authorization", &token.bearer()).map_err(js_error)?;
    }

    let value = JsFuture::from(window.fetch_with_request(&request)).await.map_err(js_error)?;
    let response: Response = value.dyn_into().map_err(js_error)?;
    if !response.ok() {
        log::warn!("{method} {url} -> HTTP {}", response.status());
        return Err(ClientError::from_status(response.status()));
    }
    Ok(response)
}

async fn read_json<T: DeserializeOwned>(response: &Response) -> ClientResult<T> {
    let promise = response.json().map_err(js_error)?;
    let value = JsFuture::from(promise).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

async fn read_text(response: &Response) -> ClientResult<String> {
    let promise = response.text().map_err(js_error)?;
    let value = JsFuture::from(promise).await.map_err(js_error)?;
    value.as_string().ok_or_else(|| ClientError::Decode("body is not text".into()))
}

async fn get_json<T: DeserializeOwned>(url: &str, token: Option<&AccessToken>) -> ClientResult<T> {
    let response = request("GET", url, None, token).await?;
    read_json(&response).await
}

async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
    token: Option<&AccessToken>,
) -> ClientResult<T> {
    let body = serde_json::to_string(body)?;
    let response = request("POST", url, Some(body), token).await?;
    read_json(&response).await
}
