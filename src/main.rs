#![allow(warnings)]
//! PickTogether Storefront Entry Point

mod api;
mod app;
mod browser;
mod components;
mod context;
mod logging;
mod markdown;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    logging::init();
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
