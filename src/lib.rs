// ============================================================================
// OSS STOREFRONT - CLIENTE WEB MVVM (RUST PURO + WASM)
// ============================================================================
// - Views: renderers por página (DOM + eventos)
// - ViewModels: estado de página + validación + recarga tras mutar
// - Services: cliente API autorizado, sesión, cachés
// - State: contexto compartido (AppState) con Rc<RefCell>
// - Models: DTOs del backend
// ============================================================================

mod models;
mod services;
mod viewmodels;
mod state;
mod stores;
mod dom;
mod views;
mod utils;
mod config;
mod error;
mod app;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;
use crate::app::App;
use crate::config::CONFIG;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 OSS Storefront - Rust Puro + MVVM ({})", CONFIG.environment);
    log::info!("🌐 [CONFIG] API: {}", CONFIG.api_base_url);

    let app = App::new()?;
    app.render()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
    Ok(())
}
