//! Global Application State Store
//!
//! Member profile and the saved-restaurant set, shared by every view that
//! shows a heart button. Uses reactive_stores for field-level reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use picktogether_core::session::MemberSession;
use picktogether_core::wishlist::Wishlist;

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Logged-in member, from the `member` cookie
    pub member: Option<MemberSession>,
    /// Restaurant ids the member has saved
    pub wishlist: Wishlist,
}

pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

pub fn store_is_saved(store: &AppStore, restaurant_id: u64) -> bool {
    store.wishlist().read().contains(restaurant_id)
}

pub fn store_set_saved(store: &AppStore, restaurant_id: u64, saved: bool) {
    store.wishlist().write().apply_toggle(restaurant_id, saved);
}

pub fn store_sign_out(store: &AppStore) {
    store.member().set(None);
    store.wishlist().write().clear();
}
