//! Restaurant Detail View

use leptos::prelude::*;
use leptos::task::spawn_local;

use picktogether_core::funding::{days_remaining, format_won, funded_percent, DEFAULT_FUNDING_DAYS};
use picktogether_core::models::RestaurantDetail;
use picktogether_core::ClientError;

use super::{CircularProgress, WishlistButton};
use crate::api::use_backend;
use crate::browser::{now_local, open_url};

#[component]
pub fn RestaurantDetailView(restaurant_id: u64) -> impl IntoView {
    let backend = StoredValue::new(use_backend());
    let detail = RwSignal::new(None::<Result<RestaurantDetail, ClientError>>);

    Effect::new(move |_| {
        let backend = backend.get_value();
        spawn_local(async move {
            let result = backend.restaurant(restaurant_id).await;
            if let Err(err) = &result {
                log::warn!("restaurant {restaurant_id}: {err}");
            }
            detail.set(Some(result));
        });
    });

    view! {
        <section class="restaurant-detail">
            {move || match detail.get() {
                None => view! { <p class="status-text">"불러오는 중입니다..."</p> }.into_any(),
                Some(Err(err)) => view! { <p class="error-text">{err.user_message()}</p> }.into_any(),
                Some(Ok(restaurant)) => view! { <DetailBody restaurant=restaurant /> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn DetailBody(restaurant: RestaurantDetail) -> impl IntoView {
    let now = now_local();
    let total = restaurant.total_funded();
    let percent = funded_percent(total, restaurant.funding_goal_amount.unwrap_or(0));
    let days_left = restaurant
        .funding_end_date
        .map(|end| days_remaining(end, now))
        .unwrap_or(DEFAULT_FUNDING_DAYS);
    let place_url = restaurant.place_url.clone();

    view! {
        <div class="detail-header">
            {restaurant.image_url.clone().map(|src| view! { <img class="detail-image" src=src alt="" /> })}
            <div class="detail-title">
                <span class="card-category">{restaurant.category_name.clone().unwrap_or_default()}</span>
                <h2>{restaurant.name.clone()}</h2>
                <WishlistButton restaurant_id=restaurant.id />
            </div>
        </div>
        <div class="detail-funding">
            <CircularProgress percent=percent size=96 stroke=8 />
            <dl>
                <dt>"모금액"</dt>
                <dd>{format_won(total)}</dd>
                <dt>"목표"</dt>
                <dd>{format_won(restaurant.funding_goal_amount.unwrap_or(0))}</dd>
                <dt>"남은 기간"</dt>
                <dd>{if days_left > 0 { format!("D-{days_left}") } else { "마감".to_string() }}</dd>
            </dl>
        </div>
        <dl class="detail-info">
            {restaurant.road_address_name.clone().map(|v| view! { <dt>"주소"</dt><dd>{v}</dd> })}
            {restaurant.phone.clone().map(|v| view! { <dt>"전화"</dt><dd>{v}</dd> })}
            {restaurant.business_hours.clone().map(|v| view! { <dt>"영업시간"</dt><dd>{v}</dd> })}
        </dl>
        {restaurant.description.clone().map(|v| view! { <p class="detail-description">{v}</p> })}
        {restaurant.notice.clone().map(|v| view! { <p class="detail-notice">{v}</p> })}
        {place_url.map(|url| view! {
            <button class="place-link" on:click=move |_| open_url(&url)>"카카오맵에서 보기"</button>
        })}
    }
}
