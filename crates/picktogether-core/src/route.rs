//! Storefront Views
//!
//! Closed set of screens the shell can show; chat quick replies and the
//! navigation bar both resolve to one of these.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    NearbyMenus,
    Restaurants,
    Restaurant(u64),
    Wishlist,
    Search(String),
    Location,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::NearbyMenus => "주변 한그릇 펀딩",
            Route::Restaurants => "주변 펀딩 식당",
            Route::Restaurant(_) => "식당 정보",
            Route::Wishlist => "찜 목록",
            Route::Search(_) => "검색",
            Route::Location => "위치 설정",
        }
    }
}
