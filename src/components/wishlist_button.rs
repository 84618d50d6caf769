//! Wishlist Heart Button
//!
//! Toggles one restaurant on the server, then mirrors the server's answer
//! into the shared store. Login problems raise a blocking alert.

use leptos::prelude::*;
use leptos::task::spawn_local;

use picktogether_core::wishlist;

use crate::api::use_backend;
use crate::browser::{alert, browser_session};
use crate::context::use_app_context;
use crate::store::{store_is_saved, store_set_saved, use_app_store, AppStateStoreFields};

#[component]
pub fn WishlistButton(restaurant_id: u64) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let backend = StoredValue::new(use_backend());
    let (busy, set_busy) = signal(false);

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        let backend = backend.get_value();
        spawn_local(async move {
            let session = browser_session();
            let mut local = store.wishlist().get_untracked();
            match wishlist::toggle(&backend, &session, &mut local, restaurant_id).await {
                Ok(outcome) => {
                    store_set_saved(&store, restaurant_id, outcome.is_wishlisted);
                    if let Some(message) = outcome.message.filter(|m| !m.is_empty()) {
                        ctx.show_toast(message);
                    }
                }
                Err(err) if err.needs_login() => alert(err.user_message()),
                Err(err) => {
                    log::warn!("wishlist toggle {restaurant_id}: {err}");
                    ctx.show_toast("찜 처리에 실패했습니다.");
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <button
            class=move || if store_is_saved(&store, restaurant_id) { "heart-btn saved" } else { "heart-btn" }
            disabled=move || busy.get()
            on:click=on_click
        >
            {move || if store_is_saved(&store, restaurant_id) { "♥" } else { "♡" }}
        </button>
    }
}
