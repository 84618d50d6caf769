//! Restaurant Card Component

use chrono::NaiveDateTime;
use leptos::prelude::*;

use picktogether_core::funding::{distance_label, format_won};
use picktogether_core::models::RestaurantThumb;
use picktogether_core::route::Route;

use super::{CircularProgress, WishlistButton};
use crate::context::use_app_context;

/// Funding card for one restaurant; clicking opens the detail view.
#[component]
pub fn RestaurantCard(restaurant: RestaurantThumb, now: NaiveDateTime) -> impl IntoView {
    let ctx = use_app_context();
    let id = restaurant.restaurant_id;
    let days_left = restaurant.days_left(now);
    let ended = restaurant.has_ended(now);
    let percent = restaurant.funded_percent();
    let total = restaurant.total_funded();
    let category = restaurant.category_name.clone().unwrap_or_default();
    let image = restaurant.image_url.clone().unwrap_or_else(|| "/placeholder.png".to_string());

    view! {
        <article
            class=if ended { "restaurant-card ended" } else { "restaurant-card" }
            on:click=move |_| ctx.navigate(Route::Restaurant(id))
        >
            <img class="card-image" src=image alt=restaurant.name.clone() />
            <WishlistButton restaurant_id=id />
            <div class="card-body">
                <span class="card-category">{category}</span>
                <h3 class="card-title">{restaurant.name.clone()}</h3>
                <p class="card-distance">{distance_label(restaurant.distance)}</p>
                <div class="card-funding">
                    <CircularProgress percent=percent />
                    <div class="card-funding-text">
                        <strong>{format_won(total)}</strong>
                        <span class="card-days">
                            {if ended { "마감".to_string() } else { format!("D-{days_left}") }}
                        </span>
                    </div>
                </div>
            </div>
        </article>
    }
}
