//! PickTogether Core
//!
//! Target-independent logic behind the storefront views:
//! - location: saved coordinate resolution
//! - feed: paged nearby-listing state machine
//! - listing: client-side sort and filter stage
//! - wishlist / chat / search: typed shapes for the external services
//! - session: typed access to client-side persisted state

pub mod chat;
pub mod config;
pub mod error;
pub mod feed;
pub mod funding;
pub mod listing;
pub mod location;
pub mod models;
pub mod route;
pub mod search;
pub mod session;
pub mod wishlist;

pub use error::{ClientError, ClientResult};
pub use location::Coordinate;
