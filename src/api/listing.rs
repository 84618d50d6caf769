//! Nearby Listing Endpoints

use async_trait::async_trait;
use leptos::prelude::*;
use leptos::task::spawn_local;

use picktogether_core::feed::{ListingSource, NearbyFeed, NearbyQuery, PageRequest};
use picktogether_core::models::{Listing, ListingPage};
use picktogether_core::ClientResult;

use super::{get_json, HttpBackend};

#[async_trait(?Send)]
impl<T: Listing> ListingSource<T> for HttpBackend {
    async fn fetch_page(&self, query: &NearbyQuery) -> ClientResult<ListingPage<T>> {
        let url = format!("{}?{}", self.config.backend_url(T::NEARBY_PATH), query.to_query_string());
        log::debug!("GET {url}");
        get_json(&url, None).await
    }
}

/// Run a feed request in the background and fold the answer into the feed.
pub fn spawn_page_fetch<T>(backend: HttpBackend, feed: RwSignal<NearbyFeed<T>>, request: PageRequest)
where
    T: Listing + Send + Sync,
{
    spawn_local(async move {
        let result = ListingSource::<T>::fetch_page(&backend, &request.query).await;
        feed.update(|f| {
            f.apply(&request, result);
        });
    });
}
