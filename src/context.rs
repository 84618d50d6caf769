//! Application Context
//!
//! Shared navigation and toast state provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use picktogether_core::route::Route;

const TOAST_MILLIS: u32 = 2_000;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current view - read
    pub route: ReadSignal<Route>,
    /// Current view - write
    set_route: WriteSignal<Route>,
    /// Transient notice at the bottom of the page
    pub toast: ReadSignal<Option<String>>,
    set_toast: WriteSignal<Option<String>>,
}

impl AppContext {
    pub fn new(
        route: (ReadSignal<Route>, WriteSignal<Route>),
        toast: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
    ) -> Self {
        Self { route: route.0, set_route: route.1, toast: toast.0, set_toast: toast.1 }
    }

    pub fn navigate(&self, route: Route) {
        log::debug!("navigate: {route:?}");
        self.set_route.set(route);
    }

    /// Show a message for a couple of seconds. A newer toast is not cleared
    /// by an older timer.
    pub fn show_toast(&self, message: impl Into<String>) {
        let message = message.into();
        self.set_toast.set(Some(message.clone()));
        let (toast, set_toast) = (self.toast, self.set_toast);
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MILLIS).await;
            if toast.get_untracked().as_deref() == Some(message.as_str()) {
                set_toast.set(None);
            }
        });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
