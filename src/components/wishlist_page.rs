//! Wishlist View
//!
//! Saved restaurants joined with their listing rows, with per-item removal
//! and "clear all".

use leptos::prelude::*;
use leptos::task::spawn_local;

use picktogether_core::config::{DEFAULT_COORDINATE, WISHLIST_DETAIL_FEED};
use picktogether_core::feed::{ListingSource, NearbyQuery};
use picktogether_core::models::RestaurantThumb;
use picktogether_core::wishlist::{self, join_details, Wishlist, WishlistEntry, WishlistService};
use picktogether_core::{ClientError, ClientResult};

use super::RestaurantCard;
use crate::api::{use_backend, HttpBackend};
use crate::browser::{alert, browser_session, confirm, now_local};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

/// Saved entries plus the restaurant rows to show them with.
async fn load_saved(backend: &HttpBackend) -> ClientResult<(Vec<WishlistEntry>, Vec<RestaurantThumb>)> {
    let token = browser_session().access_token()?;
    let entries = backend.list(&token).await?;
    let query = NearbyQuery {
        coordinate: DEFAULT_COORDINATE,
        radius_m: WISHLIST_DETAIL_FEED.radius_m,
        page: 0,
        size: WISHLIST_DETAIL_FEED.page_size,
    };
    let page = ListingSource::<RestaurantThumb>::fetch_page(backend, &query).await?;
    Ok((entries, page.content))
}

fn report(err: ClientError, toast: impl Fn(&'static str)) {
    if err.needs_login() {
        alert(err.user_message());
    } else {
        log::warn!("wishlist: {err}");
        toast("찜 목록을 수정하지 못했습니다.");
    }
}

#[component]
pub fn WishlistPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let backend = StoredValue::new(use_backend());
    let rows = RwSignal::new(None::<ClientResult<Vec<RestaurantThumb>>>);
    let now = now_local();

    Effect::new(move |_| {
        let backend = backend.get_value();
        spawn_local(async move {
            let result = load_saved(&backend).await.map(|(entries, restaurants)| {
                store.wishlist().set(Wishlist::from_entries(&entries));
                join_details(&entries, &restaurants)
            });
            rows.set(Some(result));
        });
    });

    let remove_one = move |restaurant_id: u64| {
        let backend = backend.get_value();
        spawn_local(async move {
            let session = browser_session();
            let mut local = store.wishlist().get_untracked();
            match wishlist::remove(&backend, &session, &mut local, restaurant_id).await {
                Ok(()) => {
                    store.wishlist().write().remove(restaurant_id);
                    rows.update(|r| {
                        if let Some(Ok(list)) = r {
                            list.retain(|row| row.restaurant_id != restaurant_id);
                        }
                    });
                }
                Err(err) => report(err, |m| ctx.show_toast(m)),
            }
        });
    };

    let clear = move |_| {
        if !confirm("찜 목록을 모두 비울까요?") {
            return;
        }
        let backend = backend.get_value();
        spawn_local(async move {
            let session = browser_session();
            let mut local = store.wishlist().get_untracked();
            let result = wishlist::clear_all(&backend, &session, &mut local).await;
            rows.update(|r| {
                if let Some(Ok(list)) = r {
                    list.retain(|row| local.contains(row.restaurant_id));
                }
            });
            store.wishlist().set(local);
            if let Err(err) = result {
                report(err, |m| ctx.show_toast(m));
            }
        });
    };

    view! {
        <section class="wishlist-page">
            {move || match rows.get() {
                None => view! { <p class="status-text">"찜 목록을 불러오는 중입니다..."</p> }.into_any(),
                Some(Err(err)) => view! { <p class="error-text">{err.user_message()}</p> }.into_any(),
                Some(Ok(list)) if list.is_empty() => {
                    view! { <p class="status-text">"찜한 식당이 없습니다."</p> }.into_any()
                }
                Some(Ok(list)) => view! {
                    <div class="list-toolbar">
                        <span>{format!("{}곳", list.len())}</span>
                        <button class="clear-btn" on:click=clear>"전체 삭제"</button>
                    </div>
                    <div class="card-grid">
                        {list.into_iter().map(|row| {
                            let id = row.restaurant_id;
                            view! {
                                <div class="wishlist-item">
                                    <RestaurantCard restaurant=row now=now />
                                    <button class="remove-btn" on:click=move |_| remove_one(id)>"삭제"</button>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_any(),
            }}
        </section>
    }
}
