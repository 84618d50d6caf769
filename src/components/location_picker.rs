//! Location Picker View
//!
//! Numeric latitude/longitude form that writes the saved location the
//! list views read.

use leptos::prelude::*;

use picktogether_core::config::DEFAULT_COORDINATE;
use picktogether_core::location::Coordinate;
use picktogether_core::route::Route;
use picktogether_core::{ClientError, ClientResult};

use crate::browser::browser_session;
use crate::context::use_app_context;

fn parse_coordinate(lat: &str, lng: &str) -> ClientResult<Coordinate> {
    let parse = |raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|e| ClientError::MalformedLocation(format!("{raw:?}: {e}")))
    };
    Coordinate::new(parse(lat)?, parse(lng)?)
}

#[component]
pub fn LocationPicker() -> impl IntoView {
    let ctx = use_app_context();
    let saved = browser_session().selected_location().ok();
    let (lat, set_lat) = signal(saved.map(|c| c.lat.to_string()).unwrap_or_default());
    let (lng, set_lng) = signal(saved.map(|c| c.lng.to_string()).unwrap_or_default());
    let (error, set_error) = signal::<Option<&'static str>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let result = parse_coordinate(&lat.get_untracked(), &lng.get_untracked())
            .and_then(|c| browser_session().set_selected_location(c));
        match result {
            Ok(()) => {
                set_error.set(None);
                ctx.show_toast("위치가 저장되었습니다.");
                ctx.navigate(Route::NearbyMenus);
            }
            Err(err) => {
                log::info!("location rejected: {err}");
                set_error.set(Some(err.user_message()));
            }
        }
    };

    let use_default = move |_| {
        set_lat.set(DEFAULT_COORDINATE.lat.to_string());
        set_lng.set(DEFAULT_COORDINATE.lng.to_string());
    };

    view! {
        <form class="location-picker" on:submit=on_submit>
            <label>
                "위도"
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="37.5027"
                    prop:value=move || lat.get()
                    on:input=move |ev| set_lat.set(event_target_value(&ev))
                />
            </label>
            <label>
                "경도"
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="127.0352"
                    prop:value=move || lng.get()
                    on:input=move |ev| set_lng.set(event_target_value(&ev))
                />
            </label>
            {move || error.get().map(|message| view! { <p class="error-text">{message}</p> })}
            <div class="form-actions">
                <button type="button" class="secondary-btn" on:click=use_default>"기본 위치"</button>
                <button type="submit" class="primary-btn">"저장"</button>
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        let c = parse_coordinate(" 37.5 ", "127.03").unwrap();
        assert_eq!(c, Coordinate { lat: 37.5, lng: 127.03 });
    }

    #[test]
    fn test_parse_coordinate_rejects_text() {
        assert!(matches!(parse_coordinate("north", "127"), Err(ClientError::MalformedLocation(_))));
        assert!(matches!(parse_coordinate("NaN", "127"), Err(ClientError::MalformedLocation(_))));
    }
}
