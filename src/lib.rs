use wasm_bindgen::prelude::*;

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod csv_export;
pub mod download;
pub mod grouping;
pub mod log_form;
pub mod notify;
pub mod session;
pub mod types;

pub use app::App;

#[wasm_bindgen(start)]
pub fn run_app() {
    let config = config::Config::from_env();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::info!("work tracker starting, api at {}", config::api_base_url());

    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("root"));
    match root {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => yew::Renderer::<App>::new().render(),
    };
}
