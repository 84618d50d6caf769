//! Nearby One-Bowl Menus View
//!
//! Paged list of one-bowl funding slots around the saved location, with a
//! client-side sort and a "load more" button.

use chrono::NaiveDateTime;
use leptos::prelude::*;

use picktogether_core::config::FOR_ONE_FEED;
use picktogether_core::feed::NearbyFeed;
use picktogether_core::funding::{distance_label, format_won};
use picktogether_core::listing::{sort_menus, MenuSort};
use picktogether_core::models::ForOneMenu;
use picktogether_core::route::Route;
use picktogether_core::ClientError;

use super::CircularProgress;
use crate::api::{spawn_page_fetch, use_backend};
use crate::browser::{browser_session, now_local};
use crate::context::use_app_context;

#[component]
pub fn NearbyMenus() -> impl IntoView {
    let ctx = use_app_context();
    let backend = StoredValue::new(use_backend());
    let feed = RwSignal::new(NearbyFeed::<ForOneMenu>::new(FOR_ONE_FEED));
    let (sort, set_sort) = signal(MenuSort::default());
    let now = now_local();

    // Initial page from the saved location
    Effect::new(move |_| {
        let raw = browser_session().raw_location();
        match feed.try_update(|f| f.start_from_storage(raw.as_deref())) {
            Some(Ok(request)) => spawn_page_fetch(backend.get_value(), feed, request),
            Some(Err(err)) => log::info!("menus: {err}"),
            None => {}
        }
    });

    let load_more = move |_| {
        if let Some(request) = feed.try_update(|f| f.request_more()).flatten() {
            spawn_page_fetch(backend.get_value(), feed, request);
        }
    };

    let shown = Memo::new(move |_| feed.with(|f| sort_menus(f.items(), sort.get())));

    view! {
        <section class="nearby-menus">
            <div class="list-toolbar">
                <select
                    class="sort-select"
                    prop:value=move || sort.get().as_str()
                    on:change=move |ev| set_sort.set(MenuSort::parse_key(&event_target_value(&ev)))
                >
                    {MenuSort::ALL.iter().map(|key| view! {
                        <option value=key.as_str()>{key.label()}</option>
                    }).collect_view()}
                </select>
            </div>

            {move || feed.with(|f| match f.error() {
                Some(err @ (ClientError::MissingLocation | ClientError::MalformedLocation(_))) => {
                    let message = err.user_message();
                    Some(view! {
                        <div class="blocking-message">
                            <p>{message}</p>
                            <button on:click=move |_| ctx.navigate(Route::Location)>"위치 설정하기"</button>
                        </div>
                    }.into_any())
                }
                Some(err) => Some(view! { <p class="error-text">{err.user_message()}</p> }.into_any()),
                None => None,
            })}

            <Show when=move || feed.with(|f| f.is_loading() && f.items().is_empty())>
                <p class="status-text">"메뉴를 불러오는 중입니다..."</p>
            </Show>
            <Show when=move || feed.with(|f| f.is_loaded() && f.items().is_empty())>
                <p class="status-text">"근처에 진행 중인 한그릇 펀딩이 없습니다."</p>
            </Show>

            <div class="card-grid">
                <For
                    each=move || shown.get()
                    key=|menu| menu.slot_id
                    children=move |menu| view! { <MenuCard menu=menu now=now /> }
                />
            </div>

            <Show when=move || feed.with(|f| f.has_more())>
                <button
                    class="load-more-btn"
                    disabled=move || feed.with(|f| f.is_loading())
                    on:click=load_more
                >
                    {move || if feed.with(|f| f.is_loading()) { "불러오는 중..." } else { "더 보기" }}
                </button>
            </Show>
        </section>
    }
}

#[component]
fn MenuCard(menu: ForOneMenu, now: NaiveDateTime) -> impl IntoView {
    let ctx = use_app_context();
    let discount = menu.discount();
    let progress = menu.participant_progress();
    let days = menu.days_left(now);
    let image = menu
        .image_url
        .clone()
        .unwrap_or_else(|| format!("/menus/{}.png", menu.slot_id % 45 + 1));
    let restaurant_id = menu.restaurant_id;

    view! {
        <article
            class="menu-card"
            on:click=move |_| {
                if let Some(id) = restaurant_id {
                    ctx.navigate(Route::Restaurant(id));
                }
            }
        >
            <img class="card-image" src=image alt=menu.menu_name.clone() />
            {(discount > 0).then(|| view! { <span class="discount-badge">{format!("{discount}%")}</span> })}
            <div class="card-body">
                <span class="card-category">{menu.restaurant_name.clone().unwrap_or_default()}</span>
                <h3 class="card-title">{menu.menu_name.clone()}</h3>
                <p class="card-distance">{distance_label(menu.distance)}</p>
                <div class="card-funding">
                    <CircularProgress percent=progress />
                    <div class="card-funding-text">
                        {menu.original_price.filter(|_| discount > 0).map(|price| view! {
                            <del class="original-price">{format_won(price)}</del>
                        })}
                        <strong>{format_won(menu.funding_price.unwrap_or(0))}</strong>
                        <span class="card-days">
                            {format!(
                                "{}/{}명",
                                menu.current_participants.unwrap_or(0),
                                menu.min_participants.unwrap_or(0)
                            )}
                            {days.map(|d| format!(" · D-{d}"))}
                        </span>
                    </div>
                </div>
            </div>
        </article>
    }
}
