//! Navigation Bar Component
//!
//! View tabs, the search box and the member badge.

use leptos::prelude::*;

use picktogether_core::route::Route;

use crate::browser::browser_session;
use crate::context::use_app_context;
use crate::store::{store_sign_out, use_app_store, AppStateStoreFields};

const TABS: &[(Route, &str)] = &[
    (Route::NearbyMenus, "한그릇"),
    (Route::Restaurants, "식당"),
    (Route::Wishlist, "찜"),
    (Route::Location, "위치"),
];

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (query, set_query) = signal(String::new());

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = query.get_untracked().trim().to_string();
        if !text.is_empty() {
            ctx.navigate(Route::Search(text));
        }
    };

    let logout = move |_| {
        browser_session().logout();
        store_sign_out(&store);
        ctx.show_toast("로그아웃되었습니다.");
    };

    view! {
        <header class="nav-bar">
            <button class="logo" on:click=move |_| ctx.navigate(Route::NearbyMenus)>"PickTogether"</button>
            <nav class="nav-tabs">
                {TABS.iter().map(|(route, label)| {
                    let target = route.clone();
                    let active = route.clone();
                    view! {
                        <button
                            class=move || if ctx.route.get() == active { "nav-tab active" } else { "nav-tab" }
                            on:click=move |_| ctx.navigate(target.clone())
                        >
                            {*label}
                        </button>
                    }
                }).collect_view()}
            </nav>
            <form class="nav-search" on:submit=on_search>
                <input
                    type="search"
                    placeholder="식당, 메뉴 검색"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
            </form>
            {move || match store.member().get() {
                Some(session) => {
                    let name = session.member.and_then(|m| m.nickname).unwrap_or_else(|| "회원".to_string());
                    view! {
                        <span class="member">
                            <span class="member-name">{name}</span>
                            <button class="logout-btn" on:click=logout>"로그아웃"</button>
                        </span>
                    }.into_any()
                }
                None => view! { <span class="member guest">"비회원"</span> }.into_any(),
            }}
        </header>
    }
}
