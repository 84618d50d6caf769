//! Wishlist
//!
//! Per-member saved restaurants. Every call needs the bearer token from the
//! member cookie; without one the action is refused before any request.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::models::{timestamp, RestaurantThumb};
use crate::session::{AccessToken, KeyValueStore, Session};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub member_email: Option<String>,
    pub restaurant_id: u64,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// Body of `POST /wishlist/toggle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub restaurant_id: u64,
}

/// `{ isWishlisted, message }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    pub is_wishlisted: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistStatus {
    pub is_wishlisted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WishlistCount {
    pub count: u64,
}

/// Wishlist endpoints of the backend.
#[async_trait(?Send)]
pub trait WishlistService {
    async fn list(&self, token: &AccessToken) -> ClientResult<Vec<WishlistEntry>>;

    async fn toggle(&self, token: &AccessToken, restaurant_id: u64) -> ClientResult<ToggleOutcome>;

    async fn remove(&self, token: &AccessToken, restaurant_id: u64) -> ClientResult<()>;

    async fn check(&self, token: &AccessToken, restaurant_id: u64) -> ClientResult<bool>;

    async fn count(&self, token: &AccessToken) -> ClientResult<u64>;
}

/// Locally known membership, kept in step with server answers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Wishlist {
    ids: BTreeSet<u64>,
}

impl Wishlist {
    pub fn from_entries(entries: &[WishlistEntry]) -> Self {
        Self { ids: entries.iter().map(|e| e.restaurant_id).collect() }
    }

    pub fn contains(&self, restaurant_id: u64) -> bool {
        self.ids.contains(&restaurant_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }

    /// Record the membership the server reported.
    pub fn apply_toggle(&mut self, restaurant_id: u64, is_wishlisted: bool) {
        if is_wishlisted {
            self.ids.insert(restaurant_id);
        } else {
            self.ids.remove(&restaurant_id);
        }
    }

    pub fn remove(&mut self, restaurant_id: u64) {
        self.ids.remove(&restaurant_id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Load the member's wishlist.
pub async fn load<S, L, C>(service: &S, session: &Session<L, C>) -> ClientResult<Wishlist>
where
    S: WishlistService + ?Sized,
    L: KeyValueStore,
    C: KeyValueStore,
{
    let token = session.access_token()?;
    let entries = service.list(&token).await?;
    Ok(Wishlist::from_entries(&entries))
}

/// Flip membership of one restaurant and record the server's answer.
pub async fn toggle<S, L, C>(
    service: &S,
    session: &Session<L, C>,
    wishlist: &mut Wishlist,
    restaurant_id: u64,
) -> ClientResult<ToggleOutcome>
where
    S: WishlistService + ?Sized,
    L: KeyValueStore,
    C: KeyValueStore,
{
    let token = session.access_token()?;
    let outcome = service.toggle(&token, restaurant_id).await?;
    wishlist.apply_toggle(restaurant_id, outcome.is_wishlisted);
    log::debug!("wishlist: {restaurant_id} -> {}", outcome.is_wishlisted);
    Ok(outcome)
}

/// Remove one saved restaurant.
pub async fn remove<S, L, C>(
    service: &S,
    session: &Session<L, C>,
    wishlist: &mut Wishlist,
    restaurant_id: u64,
) -> ClientResult<()>
where
    S: WishlistService + ?Sized,
    L: KeyValueStore,
    C: KeyValueStore,
{
    let token = session.access_token()?;
    service.remove(&token, restaurant_id).await?;
    wishlist.remove(restaurant_id);
    Ok(())
}

/// Remove every saved restaurant, one request each. Stops at the first
/// failure; ids not yet removed stay in the wishlist.
pub async fn clear_all<S, L, C>(
    service: &S,
    session: &Session<L, C>,
    wishlist: &mut Wishlist,
) -> ClientResult<()>
where
    S: WishlistService + ?Sized,
    L: KeyValueStore,
    C: KeyValueStore,
{
    let token = session.access_token()?;
    let ids: Vec<u64> = wishlist.ids().collect();
    for id in ids {
        service.remove(&token, id).await?;
        wishlist.remove(id);
    }
    Ok(())
}

/// Restaurant rows for the saved ids, in wishlist order. Entries with no
/// matching row are dropped.
pub fn join_details(entries: &[WishlistEntry], rows: &[RestaurantThumb]) -> Vec<RestaurantThumb> {
    entries
        .iter()
        .filter_map(|e| rows.iter().find(|r| r.restaurant_id == e.restaurant_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemberSession, MemoryStore};
    use std::cell::{Cell, RefCell};

    /// In-memory backend that checks the bearer token.
    #[derive(Default)]
    struct FakeBackend {
        saved: RefCell<BTreeSet<u64>>,
        calls: Cell<usize>,
        fail_on: Cell<Option<u64>>,
    }

    impl FakeBackend {
        fn authorize(&self, token: &AccessToken) -> ClientResult<()> {
            self.calls.set(self.calls.get() + 1);
            if token.as_str() == "good-token" {
                Ok(())
            } else {
                Err(ClientError::from_status(403))
            }
        }
    }

    #[async_trait(?Send)]
    impl WishlistService for FakeBackend {
        async fn list(&self, token: &AccessToken) -> ClientResult<Vec<WishlistEntry>> {
            self.authorize(token)?;
            Ok(self
                .saved
                .borrow()
                .iter()
                .map(|id| WishlistEntry { id: None, member_email: None, restaurant_id: *id, created_at: None })
                .collect())
        }

        async fn toggle(&self, token: &AccessToken, restaurant_id: u64) -> ClientResult<ToggleOutcome> {
            self.authorize(token)?;
            let mut saved = self.saved.borrow_mut();
            let is_wishlisted = if saved.remove(&restaurant_id) {
                false
            } else {
                saved.insert(restaurant_id);
                true
            };
            Ok(ToggleOutcome { is_wishlisted, message: None })
        }

        async fn remove(&self, token: &AccessToken, restaurant_id: u64) -> ClientResult<()> {
            self.authorize(token)?;
            if self.fail_on.get() == Some(restaurant_id) {
                return Err(ClientError::Status(500));
            }
            self.saved.borrow_mut().remove(&restaurant_id);
            Ok(())
        }

        async fn check(&self, token: &AccessToken, restaurant_id: u64) -> ClientResult<bool> {
            self.authorize(token)?;
            Ok(self.saved.borrow().contains(&restaurant_id))
        }

        async fn count(&self, token: &AccessToken) -> ClientResult<u64> {
            self.authorize(token)?;
            Ok(self.saved.borrow().len() as u64)
        }
    }

    fn logged_in(token: &str) -> Session<MemoryStore, MemoryStore> {
        let session = Session::new(MemoryStore::default(), MemoryStore::default());
        session
            .login(&MemberSession { access_token: token.to_string(), member: None })
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_double_toggle_restores_membership() {
        let backend = FakeBackend::default();
        let session = logged_in("good-token");
        let mut wishlist = load(&backend, &session).await.unwrap();
        assert!(!wishlist.contains(42));

        assert!(toggle(&backend, &session, &mut wishlist, 42).await.unwrap().is_wishlisted);
        assert!(wishlist.contains(42));
        assert!(!toggle(&backend, &session, &mut wishlist, 42).await.unwrap().is_wishlisted);
        assert!(!wishlist.contains(42));

        let token = session.access_token().unwrap();
        assert!(!backend.check(&token, 42).await.unwrap());
        assert_eq!(backend.count(&token).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_token_aborts_before_request() {
        let backend = FakeBackend::default();
        let session = Session::new(MemoryStore::default(), MemoryStore::default());
        let mut wishlist = Wishlist::default();

        let result = toggle(&backend, &session, &mut wishlist, 1).await;
        assert_eq!(result, Err(ClientError::AuthRequired));
        assert_eq!(backend.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_login_prompt() {
        let backend = FakeBackend::default();
        let session = logged_in("expired");
        let err = load(&backend, &session).await.unwrap_err();
        assert!(err.needs_login());
    }

    #[tokio::test]
    async fn test_clear_all_stops_at_first_failure() {
        let backend = FakeBackend::default();
        backend.saved.borrow_mut().extend([1, 2, 3]);
        backend.fail_on.set(Some(2));
        let session = logged_in("good-token");
        let mut wishlist = load(&backend, &session).await.unwrap();

        assert_eq!(clear_all(&backend, &session, &mut wishlist).await, Err(ClientError::Status(500)));
        assert_eq!(wishlist.ids().collect::<Vec<_>>(), vec![2, 3]);

        backend.fail_on.set(None);
        clear_all(&backend, &session, &mut wishlist).await.unwrap();
        assert!(wishlist.is_empty());
        assert!(backend.saved.borrow().is_empty());
    }

    #[test]
    fn test_join_details_keeps_wishlist_order() {
        let row = |id: u64| -> RestaurantThumb {
            serde_json::from_value(serde_json::json!({"restaurantId": id, "name": format!("r{id}")})).unwrap()
        };
        let entry = |id: u64| WishlistEntry { id: None, member_email: None, restaurant_id: id, created_at: None };
        let joined = join_details(&[entry(3), entry(9), entry(1)], &[row(1), row(2), row(3)]);
        let ids: Vec<u64> = joined.iter().map(|r| r.restaurant_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_decode_toggle_outcome() {
        let outcome: ToggleOutcome =
            serde_json::from_str(r#"{"isWishlisted": true, "message": "찜 추가되었습니다."}"#).unwrap();
        assert!(outcome.is_wishlisted);
    }
}
