//! Search Results View

use leptos::prelude::*;
use leptos::task::spawn_local;

use picktogether_core::route::Route;
use picktogether_core::search::{self, SearchHit, SearchResponse};
use picktogether_core::ClientResult;

use super::{CircularProgress, WishlistButton};
use crate::api::use_backend;
use crate::browser::now_local;
use crate::context::use_app_context;

#[component]
pub fn SearchResults(query: String) -> impl IntoView {
    let ctx = use_app_context();
    let backend = StoredValue::new(use_backend());
    let response = RwSignal::new(None::<ClientResult<SearchResponse>>);
    let heading = format!("\"{}\" 검색 결과", query.trim());

    Effect::new(move |_| {
        let backend = backend.get_value();
        let query = query.clone();
        spawn_local(async move {
            let result = search::run(&backend, &query).await;
            if let Err(err) = &result {
                log::warn!("search {query:?}: {err}");
            }
            response.set(Some(result));
        });
    });

    view! {
        <section class="search-results">
            <h2>{heading}</h2>
            {move || match response.get() {
                None => view! { <p class="status-text">"검색 중입니다..."</p> }.into_any(),
                Some(Err(err)) => view! { <p class="error-text">{err.user_message()}</p> }.into_any(),
                Some(Ok(found)) => view! {
                    {(!found.related_keywords.is_empty()).then(|| view! {
                        <div class="related-keywords">
                            {found.related_keywords.iter().cloned().map(|keyword| {
                                let label = format!("#{keyword}");
                                view! {
                                    <button
                                        class="keyword-chip"
                                        on:click=move |_| ctx.navigate(Route::Search(keyword.clone()))
                                    >
                                        {label}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    })}
                    {if found.results.is_empty() {
                        view! { <p class="status-text">"검색 결과가 없습니다."</p> }.into_any()
                    } else {
                        view! {
                            <div class="card-grid">
                                {found.results.into_iter().map(|hit| view! { <HitCard hit=hit /> }).collect_view()}
                            </div>
                        }.into_any()
                    }}
                }.into_any(),
            }}
        </section>
    }
}

#[component]
fn HitCard(hit: SearchHit) -> impl IntoView {
    let ctx = use_app_context();
    let id = hit.id;
    let percent = hit.funded_percent();
    let days = hit.days_left(now_local());

    view! {
        <article class="restaurant-card" on:click=move |_| ctx.navigate(Route::Restaurant(id))>
            {hit.image_url.clone().map(|src| view! { <img class="card-image" src=src alt="" /> })}
            <WishlistButton restaurant_id=id />
            <div class="card-body">
                <span class="card-category">{hit.category_name.clone().unwrap_or_default()}</span>
                <h3 class="card-title">{hit.name.clone()}</h3>
                <div class="card-funding">
                    <CircularProgress percent=percent />
                    {days.map(|d| view! { <span class="card-days">{format!("D-{d}")}</span> })}
                </div>
            </div>
        </article>
    }
}
