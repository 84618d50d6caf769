//! Paged Nearby Feed
//!
//! Accumulates pages of a nearby listing for one coordinate. Fetching is
//! split into `request_*` (decide what to ask for) and `apply` (fold the
//! answer in) so the UI can hold the feed in a signal and await the
//! transport in between.
//!
//! At most one request is outstanding per feed. Each request is stamped with
//! the feed generation; a coordinate change bumps it, and answers to older
//! requests are dropped instead of appended.

use async_trait::async_trait;

use crate::config::FeedParams;
use crate::error::{ClientError, ClientResult};
use crate::location::{resolve_location, Coordinate};
use crate::models::ListingPage;

/// Query parameters of one nearby page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub coordinate: Coordinate,
    pub radius_m: u32,
    pub page: u32,
    pub size: u32,
}

impl NearbyQuery {
    /// `lat=..&lng=..&radius=..&page=..&size=..`
    pub fn to_query_string(&self) -> String {
        format!(
            "lat={}&lng={}&radius={}&page={}&size={}",
            self.coordinate.lat, self.coordinate.lng, self.radius_m, self.page, self.size
        )
    }
}

/// Source of nearby pages (HTTP in the browser, fakes in tests).
#[async_trait(?Send)]
pub trait ListingSource<T> {
    async fn fetch_page(&self, query: &NearbyQuery) -> ClientResult<ListingPage<T>>;
}

/// A request handed out by the feed; must be passed back to `apply`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    pub query: NearbyQuery,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading { page: u32 },
    Loaded,
    Failed(ClientError),
}

/// What `apply` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Replaced,
    Appended,
    Failed,
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyFeed<T> {
    params: FeedParams,
    coordinate: Option<Coordinate>,
    items: Vec<T>,
    total_pages: u32,
    /// Index of the last page folded in; None until page 0 arrives.
    page: Option<u32>,
    state: FetchState,
    generation: u64,
}

impl<T: Clone> NearbyFeed<T> {
    pub fn new(params: FeedParams) -> Self {
        Self {
            params,
            coordinate: None,
            items: Vec::new(),
            total_pages: 0,
            page: None,
            state: FetchState::Idle,
            generation: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading { .. })
    }

    /// A page has arrived for the current coordinate and nothing is pending.
    pub fn is_loaded(&self) -> bool {
        self.state == FetchState::Loaded
    }

    pub fn error(&self) -> Option<&ClientError> {
        match &self.state {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// True exactly when current page + 1 < total pages.
    pub fn has_more(&self) -> bool {
        self.page.is_some_and(|p| p + 1 < self.total_pages)
    }

    /// Resolve the persisted location and request page 0. On a missing or
    /// malformed location the feed fails and nothing is requested.
    pub fn start_from_storage(&mut self, raw: Option<&str>) -> ClientResult<PageRequest> {
        match resolve_location(raw) {
            Ok(coordinate) => Ok(self.set_coordinate(coordinate)),
            Err(err) => {
                log::warn!("nearby feed: {err}");
                self.generation += 1;
                self.coordinate = None;
                self.clear();
                self.state = FetchState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Switch to a new coordinate: drop everything and request page 0.
    pub fn set_coordinate(&mut self, coordinate: Coordinate) -> PageRequest {
        self.generation += 1;
        self.coordinate = Some(coordinate);
        self.clear();
        self.request(coordinate, 0)
    }

    /// Next page, or a retry of the page that just failed. None while a
    /// request is outstanding or when everything is loaded.
    pub fn request_more(&mut self) -> Option<PageRequest> {
        let coordinate = self.coordinate?;
        let next = match (&self.state, self.page) {
            (FetchState::Loading { .. }, _) | (FetchState::Idle, _) => return None,
            (FetchState::Failed(_), None) => 0,
            (_, Some(_)) if !self.has_more() => return None,
            (_, Some(page)) => page + 1,
            (FetchState::Loaded, None) => 0,
        };
        Some(self.request(coordinate, next))
    }

    /// Fold a response in. Failures keep already loaded pages.
    pub fn apply(&mut self, request: &PageRequest, result: ClientResult<ListingPage<T>>) -> Applied {
        let expected = FetchState::Loading { page: request.query.page };
        if request.generation != self.generation || self.state != expected {
            log::debug!(
                "nearby feed: dropping stale page {} (generation {} != {})",
                request.query.page,
                request.generation,
                self.generation
            );
            return Applied::Stale;
        }

        match result {
            Ok(page) => {
                let applied = if request.query.page == 0 {
                    self.items = page.content;
                    Applied::Replaced
                } else {
                    self.items.extend(page.content);
                    Applied::Appended
                };
                self.total_pages = page.total_pages;
                self.page = Some(page.number);
                self.state = FetchState::Loaded;
                log::debug!(
                    "nearby feed: page {}/{} -> {} items",
                    page.number + 1,
                    self.total_pages,
                    self.items.len()
                );
                applied
            }
            Err(err) => {
                log::warn!("nearby feed: page {} failed: {err}", request.query.page);
                self.state = FetchState::Failed(err);
                Applied::Failed
            }
        }
    }

    fn request(&mut self, coordinate: Coordinate, page: u32) -> PageRequest {
        self.state = FetchState::Loading { page };
        PageRequest {
            query: NearbyQuery {
                coordinate,
                radius_m: self.params.radius_m,
                page,
                size: self.params.page_size,
            },
            generation: self.generation,
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.total_pages = 0;
        self.page = None;
    }
}
