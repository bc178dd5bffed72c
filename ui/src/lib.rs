#![recursion_limit = "256"]
#![warn(rust_2018_idioms)]

mod app;
mod console;
pub mod store;

use log::LevelFilter;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn run_app() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console::init(LevelFilter::Info);
    Ok(yew::start_app::<app::App>())
}
