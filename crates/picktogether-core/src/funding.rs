//! Funding Arithmetic
//!
//! Progress, countdown and price figures derived from listing rows.

use chrono::{Duration, NaiveDateTime};

use crate::models::{ForOneMenu, RestaurantThumb};

const DAY_MS: i64 = 86_400_000;

/// Restaurants without an end date are shown as running for this long.
pub const DEFAULT_FUNDING_DAYS: i64 = 14;

/// round(100 × amount ÷ goal); 0 when there is no positive goal.
/// Not clamped: over-funded rows sort above 100%.
pub fn funded_percent(amount: i64, goal: i64) -> i64 {
    if goal <= 0 || amount < 0 {
        return 0;
    }
    (amount as f64 * 100.0 / goal as f64).round() as i64
}

/// Whole days left, rounded up, never negative.
pub fn days_remaining(end: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let ms = (end - now).num_milliseconds();
    if ms <= 0 {
        0
    } else {
        (ms + DAY_MS - 1) / DAY_MS
    }
}

/// Participants committed against the minimum needed, as a percentage.
pub fn participant_percent(current: i64, minimum: i64) -> i64 {
    funded_percent(current, minimum)
}

/// "1,234m 거리", or a placeholder when the distance is unknown.
pub fn distance_label(distance: Option<f64>) -> String {
    match distance {
        Some(d) if d.is_finite() => format!("{}m 거리", group_thousands(d.round() as i64)),
        _ => "거리 정보 없음".to_string(),
    }
}

/// "9,000원"
pub fn format_won(amount: i64) -> String {
    format!("{}원", group_thousands(amount))
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl ForOneMenu {
    /// Server-provided discount, else derived from the two prices.
    pub fn discount(&self) -> i64 {
        if let Some(percent) = self.discount_percent {
            return percent;
        }
        match (self.original_price, self.funding_price) {
            (Some(original), Some(funding)) if original > 0 && funding > 0 => {
                ((original - funding) as f64 / original as f64 * 100.0).round() as i64
            }
            _ => 0,
        }
    }

    pub fn participant_progress(&self) -> i64 {
        participant_percent(
            self.current_participants.unwrap_or(0),
            self.min_participants.unwrap_or(0),
        )
    }

    pub fn days_left(&self, now: NaiveDateTime) -> Option<i64> {
        self.ends_at.map(|end| days_remaining(end, now))
    }
}

impl RestaurantThumb {
    /// Direct funding plus the sum of committed funding orders.
    pub fn total_funded(&self) -> i64 {
        self.funding_amount.unwrap_or(0) + self.total_funding_amount.unwrap_or(0)
    }

    pub fn funded_percent(&self) -> i64 {
        funded_percent(self.total_funded(), self.funding_goal_amount.unwrap_or(0))
    }

    pub fn days_left(&self, now: NaiveDateTime) -> i64 {
        let end = self
            .funding_end_date
            .unwrap_or_else(|| now + Duration::days(DEFAULT_FUNDING_DAYS));
        days_remaining(end, now)
    }

    pub fn has_ended(&self, now: NaiveDateTime) -> bool {
        self.days_left(now) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn test_funded_percent() {
        assert_eq!(funded_percent(50, 200), 25);
        assert_eq!(funded_percent(1, 3), 33);
        assert_eq!(funded_percent(2, 3), 67);
        assert_eq!(funded_percent(300, 200), 150);
        assert_eq!(funded_percent(10, 0), 0);
    }

    #[test]
    fn test_days_remaining_rounds_up_and_floors_at_zero() {
        assert_eq!(days_remaining(at(10, 12), at(10, 11)), 1);
        assert_eq!(days_remaining(at(12, 0), at(10, 0)), 2);
        assert_eq!(days_remaining(at(12, 1), at(10, 0)), 3);
        assert_eq!(days_remaining(at(10, 0), at(10, 0)), 0);
        assert_eq!(days_remaining(at(9, 0), at(10, 0)), 0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(distance_label(Some(1234.6)), "1,235m 거리");
        assert_eq!(distance_label(Some(87.0)), "87m 거리");
        assert_eq!(distance_label(None), "거리 정보 없음");
        assert_eq!(format_won(1_250_000), "1,250,000원");
    }

    #[test]
    fn test_restaurant_without_end_date_runs_two_weeks() {
        let row: RestaurantThumb =
            serde_json::from_str(r#"{"restaurantId": 1, "name": "a"}"#).unwrap();
        assert_eq!(row.days_left(at(1, 0)), DEFAULT_FUNDING_DAYS);
        assert_eq!(row.funded_percent(), 0);
    }

    #[test]
    fn test_menu_discount_fallback() {
        let menu: ForOneMenu = serde_json::from_str(
            r#"{"slotId": 1, "menuName": "a", "originalPrice": 10000, "fundingPrice": 7500}"#,
        )
        .unwrap();
        assert_eq!(menu.discount(), 25);
    }
}
