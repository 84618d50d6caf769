//! Location Resolver
//!
//! Reads the coordinate chosen in the location picker. The stored shape is
//! `{ "lat": .., "lng": .. }` where either field may be a number or a
//! numeric string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// A validated (finite) latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> ClientResult<Self> {
        let coordinate = Self { lat, lng };
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(ClientError::MalformedLocation(format!("non-finite coordinate ({lat}, {lng})")))
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// JSON written under the selected-location key.
    pub fn to_storage_json(&self) -> String {
        format!(r#"{{"lat":{},"lng":{}}}"#, self.lat, self.lng)
    }
}

/// Resolve the persisted coordinate, or explain why it can't be used.
pub fn resolve_location(raw: Option<&str>) -> ClientResult<Coordinate> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(ClientError::MissingLocation),
    };

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ClientError::MalformedLocation(e.to_string()))?;

    let lat = numeric_field(&value, "lat")?;
    let lng = numeric_field(&value, "lng")?;
    Coordinate::new(lat, lng)
}

fn numeric_field(value: &Value, name: &str) -> ClientResult<f64> {
    let parsed = match value.get(name) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ClientError::MalformedLocation(format!("`{name}` is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_numbers_and_strings() {
        let c = resolve_location(Some(r#"{"lat":37.5,"lng":127.03}"#)).unwrap();
        assert_eq!(c, Coordinate { lat: 37.5, lng: 127.03 });

        let c = resolve_location(Some(r#"{"lat":"37.5","lng":" 127.03 "}"#)).unwrap();
        assert_eq!(c, Coordinate { lat: 37.5, lng: 127.03 });
    }

    #[test]
    fn test_missing_location() {
        assert_eq!(resolve_location(None), Err(ClientError::MissingLocation));
        assert_eq!(resolve_location(Some("  ")), Err(ClientError::MissingLocation));
    }

    #[test]
    fn test_malformed_location() {
        for raw in [
            r#"{"lat":"north","lng":127.0}"#,
            r#"{"lng":127.0}"#,
            r#"{"lat":null,"lng":127.0}"#,
            r#"{"lat":"NaN","lng":127.0}"#,
            r#"{"lat":"inf","lng":127.0}"#,
            "not json",
        ] {
            assert!(
                matches!(resolve_location(Some(raw)), Err(ClientError::MalformedLocation(_))),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn test_storage_json_round_trips() {
        let c = Coordinate::new(37.5027, 127.0352).unwrap();
        assert_eq!(resolve_location(Some(&c.to_storage_json())), Ok(c));
    }
}
