/// Preview Launcher - Chrome Extension for opening preview URLs per environment
/// Built with Rust + WASM + Yew

pub mod config;
pub mod domain;
pub mod environment;
pub mod error;
pub mod params;
pub mod render;
pub mod state;
pub mod storage;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the domain check for JavaScript access
#[wasm_bindgen]
pub fn is_valid_domain(url: &str) -> bool {
    domain::is_valid_domain(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
