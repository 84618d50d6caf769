//! UI Components
//!
//! Views and the small widgets they share.

mod chat_bot;
mod location_picker;
mod nav_bar;
mod nearby_menus;
mod progress_ring;
mod restaurant_card;
mod restaurant_detail;
mod restaurant_list;
mod search_results;
mod wishlist_button;
mod wishlist_page;

pub use chat_bot::ChatBot;
pub use location_picker::LocationPicker;
pub use nav_bar::NavBar;
pub use nearby_menus::NearbyMenus;
pub use progress_ring::CircularProgress;
pub use restaurant_card::RestaurantCard;
pub use restaurant_detail::RestaurantDetailView;
pub use restaurant_list::RestaurantList;
pub use search_results::SearchResults;
pub use wishlist_button::WishlistButton;
pub use wishlist_page::WishlistPage;
