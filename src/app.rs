//! PickTogether Storefront App
//!
//! Shell with the navigation bar, the current view and the floating chat
//! widget. Views are switched through a `Route` signal.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use picktogether_core::config::ApiConfig;
use picktogether_core::route::Route;
use picktogether_core::wishlist;

use crate::api::HttpBackend;
use crate::browser::{alert, browser_session};
use crate::components::{
    ChatBot, LocationPicker, NavBar, NearbyMenus, RestaurantDetailView, RestaurantList,
    SearchResults, WishlistPage,
};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    let session = browser_session();

    // Without a usable location the list views have nothing to show.
    let start = if session.selected_location().is_ok() { Route::default() } else { Route::Location };
    let (route, set_route) = signal(start);
    let toast = signal::<Option<String>>(None);
    let ctx = AppContext::new((route, set_route), toast);
    provide_context(ctx);

    let backend = HttpBackend::new(ApiConfig::from_env());
    provide_context(backend.clone());

    let store: AppStore = Store::new(AppState {
        member: session.member(),
        ..Default::default()
    });
    provide_context(store);

    // Load saved restaurants once for the heart buttons
    Effect::new(move |_| {
        if store.member().get_untracked().is_none() {
            return;
        }
        let backend = backend.clone();
        spawn_local(async move {
            let session = browser_session();
            match wishlist::load(&backend, &session).await {
                Ok(saved) => store.wishlist().set(saved),
                Err(err) if err.needs_login() => {
                    log::warn!("stored session rejected: {err}");
                    alert(err.user_message());
                }
                Err(err) => log::warn!("wishlist load failed: {err}"),
            }
        });
    });

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="page">
                <h1 class="page-title">{move || route.get().title()}</h1>
                {move || match route.get() {
                    Route::NearbyMenus => view! { <NearbyMenus /> }.into_any(),
                    Route::Restaurants => view! { <RestaurantList /> }.into_any(),
                    Route::Restaurant(id) => view! { <RestaurantDetailView restaurant_id=id /> }.into_any(),
                    Route::Wishlist => view! { <WishlistPage /> }.into_any(),
                    Route::Search(query) => view! { <SearchResults query=query /> }.into_any(),
                    Route::Location => view! { <LocationPicker /> }.into_any(),
                }}
            </main>
            <ChatBot />
            {move || ctx.toast.get().map(|message| view! { <div class="toast">{message}</div> })}
        </div>
    }
}
