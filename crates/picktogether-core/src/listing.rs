//! Filter/Sort Stage
//!
//! Recomputes the displayed list from the accumulated one. Nothing here
//! mutates its input; the output always holds a subset of the input rows.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::models::{ForOneMenu, RestaurantThumb};

/// Sort options of the one-bowl menu list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuSort {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    DistanceAsc,
}

impl MenuSort {
    pub const ALL: [MenuSort; 4] =
        [MenuSort::Default, MenuSort::PriceAsc, MenuSort::PriceDesc, MenuSort::DistanceAsc];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuSort::Default => "default",
            MenuSort::PriceAsc => "priceAsc",
            MenuSort::PriceDesc => "priceDesc",
            MenuSort::DistanceAsc => "distance",
        }
    }

    /// Inverse of `as_str`; unknown keys fall back to the default order.
    pub fn parse_key(s: &str) -> Self {
        match s {
            "priceAsc" => MenuSort::PriceAsc,
            "priceDesc" => MenuSort::PriceDesc,
            "distance" => MenuSort::DistanceAsc,
            _ => MenuSort::Default,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuSort::Default => "기본순",
            MenuSort::PriceAsc => "낮은 가격순",
            MenuSort::PriceDesc => "높은 가격순",
            MenuSort::DistanceAsc => "가까운 순",
        }
    }
}

/// Sort options of the restaurant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestaurantSort {
    Distance,
    FundingHigh,
    FundingLow,
    #[default]
    PercentHigh,
    DaysLeft,
}

impl RestaurantSort {
    pub const ALL: [RestaurantSort; 5] = [
        RestaurantSort::PercentHigh,
        RestaurantSort::Distance,
        RestaurantSort::FundingHigh,
        RestaurantSort::FundingLow,
        RestaurantSort::DaysLeft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RestaurantSort::Distance => "distance",
            RestaurantSort::FundingHigh => "fundingHigh",
            RestaurantSort::FundingLow => "fundingLow",
            RestaurantSort::PercentHigh => "percentHigh",
            RestaurantSort::DaysLeft => "daysLeft",
        }
    }

    /// Inverse of `as_str`; unknown keys fall back to the default order.
    pub fn parse_key(s: &str) -> Self {
        match s {
            "distance" => RestaurantSort::Distance,
            "fundingHigh" => RestaurantSort::FundingHigh,
            "fundingLow" => RestaurantSort::FundingLow,
            "daysLeft" => RestaurantSort::DaysLeft,
            _ => RestaurantSort::PercentHigh,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RestaurantSort::Distance => "가까운 순",
            RestaurantSort::FundingHigh => "펀딩 금액 높은 순",
            RestaurantSort::FundingLow => "펀딩 금액 낮은 순",
            RestaurantSort::PercentHigh => "달성률 높은 순",
            RestaurantSort::DaysLeft => "마감 임박 순",
        }
    }
}

/// Category restriction of the restaurant list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Contains(String),
}

impl CategoryFilter {
    /// "all" (or nothing) disables the filter.
    pub fn from_selection(selected: &str) -> Self {
        let selected = selected.trim();
        if selected.is_empty() || selected.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Contains(selected.to_string())
        }
    }

    pub fn matches(&self, label: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Contains(needle) => label.is_some_and(|l| l.contains(needle.as_str())),
        }
    }
}

fn distance_key(distance: Option<f64>) -> f64 {
    distance.filter(|d| d.is_finite()).unwrap_or(0.0)
}

/// Sorted copy of the menu list.
pub fn sort_menus(menus: &[ForOneMenu], sort: MenuSort) -> Vec<ForOneMenu> {
    let mut out = menus.to_vec();
    let price = |m: &ForOneMenu| m.funding_price.unwrap_or(0);
    match sort {
        MenuSort::Default => {}
        MenuSort::PriceAsc => out.sort_by_key(price),
        MenuSort::PriceDesc => out.sort_by(|a, b| price(b).cmp(&price(a))),
        MenuSort::DistanceAsc => {
            out.sort_by(|a, b| distance_key(a.distance).total_cmp(&distance_key(b.distance)))
        }
    }
    out
}

/// Restaurant list view state that drives `derive_restaurants`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RestaurantQuery {
    pub sort: RestaurantSort,
    pub category: CategoryFilter,
    pub text: String,
}

/// Case-insensitive substring match over name and road address.
pub fn matches_text(row: &RestaurantThumb, text: &str) -> bool {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return true;
    }
    row.name.to_lowercase().contains(&text)
        || row
            .road_address_name
            .as_deref()
            .is_some_and(|addr| addr.to_lowercase().contains(&text))
}

fn compare_restaurants(
    a: &RestaurantThumb,
    b: &RestaurantThumb,
    sort: RestaurantSort,
    now: NaiveDateTime,
) -> Ordering {
    // Ended rows go last whatever the chosen key.
    let ended = a.has_ended(now).cmp(&b.has_ended(now));
    if ended != Ordering::Equal {
        return ended;
    }
    match sort {
        RestaurantSort::Distance => distance_key(a.distance).total_cmp(&distance_key(b.distance)),
        RestaurantSort::FundingHigh => b.total_funded().cmp(&a.total_funded()),
        RestaurantSort::FundingLow => a.total_funded().cmp(&b.total_funded()),
        RestaurantSort::PercentHigh => b.funded_percent().cmp(&a.funded_percent()),
        RestaurantSort::DaysLeft => a.days_left(now).cmp(&b.days_left(now)),
    }
}

/// Filtered, sorted copy of the restaurant list.
pub fn derive_restaurants(
    rows: &[RestaurantThumb],
    query: &RestaurantQuery,
    now: NaiveDateTime,
) -> Vec<RestaurantThumb> {
    let mut out: Vec<RestaurantThumb> = rows
        .iter()
        .filter(|r| query.category.matches(r.category_name.as_deref()))
        .filter(|r| matches_text(r, &query.text))
        .cloned()
        .collect();
    out.sort_by(|a, b| compare_restaurants(a, b, query.sort, now));
    out
}

/// Distinct category labels, in first-seen order, for the filter picker.
pub fn category_labels(rows: &[RestaurantThumb]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for label in rows.iter().filter_map(|r| r.category_name.as_deref()) {
        if !labels.iter().any(|l| l == label) {
            labels.push(label.to_string());
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn menu(slot_id: u64, price: i64, distance: f64) -> ForOneMenu {
        serde_json::from_value(serde_json::json!({
            "slotId": slot_id,
            "menuName": format!("menu {slot_id}"),
            "fundingPrice": price,
            "distance": distance,
        }))
        .unwrap()
    }

    fn restaurant(id: u64, category: &str, funded: i64, goal: i64, days: i64, distance: f64) -> RestaurantThumb {
        RestaurantThumb {
            restaurant_id: id,
            name: format!("식당 {id}"),
            road_address_name: Some(format!("서울 강남구 {id}길")),
            place_url: None,
            category_name: Some(category.to_string()),
            distance: Some(distance),
            funding_amount: Some(funded),
            funding_goal_amount: Some(goal),
            funding_percent: None,
            image_url: None,
            funding_start_date: None,
            funding_end_date: Some(now() + Duration::days(days)),
            total_funding_amount: None,
        }
    }

    fn prices(menus: &[ForOneMenu]) -> Vec<i64> {
        menus.iter().map(|m| m.funding_price.unwrap()).collect()
    }

    #[test]
    fn test_price_sorts() {
        let menus = vec![menu(1, 500, 3.0), menu(2, 100, 1.0), menu(3, 300, 2.0)];
        let asc = sort_menus(&menus, MenuSort::PriceAsc);
        assert_eq!(prices(&asc), vec![100, 300, 500]);
        assert_eq!(prices(&sort_menus(&menus, MenuSort::PriceDesc)), vec![500, 300, 100]);
        assert_eq!(sort_menus(&asc, MenuSort::PriceAsc), asc);
        assert_eq!(prices(&sort_menus(&menus, MenuSort::Default)), vec![500, 100, 300]);
        // input untouched
        assert_eq!(prices(&menus), vec![500, 100, 300]);
    }

    #[test]
    fn test_distance_sort_treats_missing_as_zero() {
        let mut far = menu(1, 0, 900.0);
        far.distance = None;
        let menus = vec![menu(2, 0, 50.0), far];
        let sorted = sort_menus(&menus, MenuSort::DistanceAsc);
        assert_eq!(sorted[0].slot_id, 1);
    }

    #[test]
    fn test_ended_rows_always_last() {
        let rows = vec![
            restaurant(1, "한식당", 900, 1000, 0, 10.0),
            restaurant(2, "중식당", 100, 1000, 5, 500.0),
            restaurant(3, "한식뷔페", 500, 1000, 2, 200.0),
            restaurant(4, "일식당", 1000, 1000, -3, 1.0),
        ];
        for sort in RestaurantSort::ALL {
            let query = RestaurantQuery { sort, ..Default::default() };
            let derived = derive_restaurants(&rows, &query, now());
            let ids: Vec<u64> = derived.iter().map(|r| r.restaurant_id).collect();
            let (live, ended) = ids.split_at(2);
            assert!(live.iter().all(|id| *id == 2 || *id == 3), "{sort:?}: {ids:?}");
            assert!(ended.iter().all(|id| *id == 1 || *id == 4), "{sort:?}: {ids:?}");
        }
    }

    #[test]
    fn test_restaurant_keys() {
        let rows = vec![
            restaurant(1, "a", 100, 1000, 9, 300.0),
            restaurant(2, "a", 800, 1000, 3, 100.0),
            restaurant(3, "a", 400, 500, 6, 200.0),
        ];
        let ids = |sort| -> Vec<u64> {
            let query = RestaurantQuery { sort, ..Default::default() };
            derive_restaurants(&rows, &query, now()).iter().map(|r| r.restaurant_id).collect()
        };
        assert_eq!(ids(RestaurantSort::Distance), vec![2, 3, 1]);
        assert_eq!(ids(RestaurantSort::FundingHigh), vec![2, 3, 1]);
        assert_eq!(ids(RestaurantSort::FundingLow), vec![1, 3, 2]);
        assert_eq!(ids(RestaurantSort::PercentHigh), vec![2, 3, 1]);
        assert_eq!(ids(RestaurantSort::DaysLeft), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_keys_parse_back() {
        for key in MenuSort::ALL {
            assert_eq!(MenuSort::parse_key(key.as_str()), key);
        }
        for key in RestaurantSort::ALL {
            assert_eq!(RestaurantSort::parse_key(key.as_str()), key);
        }
        assert_eq!(MenuSort::parse_key("bogus"), MenuSort::Default);
        assert_eq!(RestaurantSort::parse_key(""), RestaurantSort::PercentHigh);
    }

    #[test]
    fn test_category_filter_is_substring() {
        let rows = vec![
            restaurant(1, "한식당", 0, 1, 3, 0.0),
            restaurant(2, "중식당", 0, 1, 3, 0.0),
            restaurant(3, "한식뷔페", 0, 1, 3, 0.0),
        ];
        let query = RestaurantQuery {
            sort: RestaurantSort::Distance,
            category: CategoryFilter::from_selection("한식"),
            text: String::new(),
        };
        let labels: Vec<String> = derive_restaurants(&rows, &query, now())
            .into_iter()
            .filter_map(|r| r.category_name)
            .collect();
        assert_eq!(labels, vec!["한식당".to_string(), "한식뷔페".to_string()]);

        assert_eq!(CategoryFilter::from_selection("all"), CategoryFilter::All);
        assert_eq!(category_labels(&rows).len(), 3);
    }

    #[test]
    fn test_text_filter() {
        let row = restaurant(7, "a", 0, 1, 3, 0.0);
        assert!(matches_text(&row, "  "));
        assert!(matches_text(&row, "강남구"));
        assert!(matches_text(&row, "식당 7"));
        assert!(!matches_text(&row, "부산"));
    }
}
