//! Circular Progress Component

use leptos::prelude::*;

/// Ring showing a funding percentage. Values above 100 draw a full ring
/// but keep their label.
#[component]
pub fn CircularProgress(
    percent: i64,
    #[prop(default = 56)] size: u32,
    #[prop(default = 6)] stroke: u32,
) -> impl IntoView {
    let radius = (size as f64 - stroke as f64) / 2.0;
    let circumference = 2.0 * std::f64::consts::PI * radius;
    let filled = percent.clamp(0, 100) as f64 / 100.0;
    let offset = circumference * (1.0 - filled);
    let center = size as f64 / 2.0;

    view! {
        <svg class="progress-ring" width=size height=size viewBox=format!("0 0 {size} {size}")>
            <circle class="progress-ring-track" cx=center cy=center r=radius fill="none" stroke-width=stroke />
            <circle
                class="progress-ring-fill"
                cx=center
                cy=center
                r=radius
                fill="none"
                stroke-width=stroke
                stroke-dasharray=circumference
                stroke-dashoffset=offset
                transform=format!("rotate(-90 {center} {center})")
            />
            <text x="50%" y="50%" text-anchor="middle" dominant-baseline="central">{format!("{percent}%")}</text>
        </svg>
    }
}
