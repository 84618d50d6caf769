//! Nearby Restaurants View
//!
//! Paged restaurant feed with sort, category and free-text filters applied
//! on the client over everything loaded so far.

use leptos::prelude::*;

use picktogether_core::config::RESTAURANT_FEED;
use picktogether_core::feed::NearbyFeed;
use picktogether_core::listing::{category_labels, derive_restaurants, CategoryFilter, RestaurantQuery, RestaurantSort};
use picktogether_core::models::RestaurantThumb;
use picktogether_core::route::Route;
use picktogether_core::ClientError;

use super::RestaurantCard;
use crate::api::{spawn_page_fetch, use_backend};
use crate::browser::{browser_session, now_local};
use crate::context::use_app_context;

#[component]
pub fn RestaurantList() -> impl IntoView {
    let ctx = use_app_context();
    let backend = StoredValue::new(use_backend());
    let feed = RwSignal::new(NearbyFeed::<RestaurantThumb>::new(RESTAURANT_FEED));
    let query = RwSignal::new(RestaurantQuery::default());
    let now = now_local();

    Effect::new(move |_| {
        let raw = browser_session().raw_location();
        match feed.try_update(|f| f.start_from_storage(raw.as_deref())) {
            Some(Ok(request)) => spawn_page_fetch(backend.get_value(), feed, request),
            Some(Err(err)) => log::info!("restaurants: {err}"),
            None => {}
        }
    });

    let load_more = move |_| {
        if let Some(request) = feed.try_update(|f| f.request_more()).flatten() {
            spawn_page_fetch(backend.get_value(), feed, request);
        }
    };

    let shown = Memo::new(move |_| feed.with(|f| query.with(|q| derive_restaurants(f.items(), q, now))));
    let categories = Memo::new(move |_| feed.with(|f| category_labels(f.items())));

    view! {
        <section class="restaurant-list">
            <div class="list-toolbar">
                <select
                    class="sort-select"
                    prop:value=move || query.with(|q| q.sort.as_str())
                    on:change=move |ev| {
                        let sort = RestaurantSort::parse_key(&event_target_value(&ev));
                        query.update(|q| q.sort = sort);
                    }
                >
                    {RestaurantSort::ALL.iter().map(|key| view! {
                        <option value=key.as_str()>{key.label()}</option>
                    }).collect_view()}
                </select>
                <select
                    class="category-select"
                    on:change=move |ev| {
                        let category = CategoryFilter::from_selection(&event_target_value(&ev));
                        query.update(|q| q.category = category);
                    }
                >
                    <option value="all">"전체"</option>
                    {move || categories.get().into_iter().map(|label| view! {
                        <option value=label.clone()>{label.clone()}</option>
                    }).collect_view()}
                </select>
                <input
                    class="text-filter"
                    type="search"
                    placeholder="식당 이름, 주소"
                    prop:value=move || query.with(|q| q.text.clone())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        query.update(|q| q.text = text);
                    }
                />
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
                <p class="status-text">"식당을 불러오는 중입니다..."</p>
            </Show>
            <Show when=move || feed.with(|f| f.is_loaded()) && shown.with(|s| s.is_empty())>
                <p class="status-text">"조건에 맞는 식당이 없습니다."</p>
            </Show>

            <div class="card-grid">
                <For
                    each=move || shown.get()
                    key=|row| row.restaurant_id
                    children=move |row| view! { <RestaurantCard restaurant=row now=now /> }
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
