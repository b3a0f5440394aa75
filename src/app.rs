// ============================================================================
// APP - Enrutado por página y arranque
// ============================================================================
// Cada página HTML carga el mismo WASM; el pathname decide qué renderer
// corre. Todas las páginas salvo login/registro exigen token.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{clear_children, document, get_element_by_id, location_pathname};
use crate::services::ApiClient;
use crate::state::AppState;
use crate::views;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Home,
    Product,
    Cart,
    Orders,
    Profile,
    Moderator,
}

impl Page {
    /// Página a partir de `location.pathname`; raíz y desconocidas van a home
    pub fn from_path(pathname: &str) -> Page {
        let file = pathname.rsplit('/').next().unwrap_or("");
        let name = file.strip_suffix(".html").unwrap_or(file);
        match name {
            "login" => Page::Login,
            "register" => Page::Register,
            "product" => Page::Product,
            "cart" => Page::Cart,
            "orders" => Page::Orders,
            "profile" => Page::Profile,
            "moderator" => Page::Moderator,
            _ => Page::Home,
        }
    }

    pub fn file(&self) -> &'static str {
        match self {
            Page::Login => "login.html",
            Page::Register => "register.html",
            Page::Home => "home.html",
            Page::Product => "product.html",
            Page::Cart => "cart.html",
            Page::Orders => "orders.html",
            Page::Profile => "profile.html",
            Page::Moderator => "moderator.html",
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Page::Login | Page::Register)
    }
}

pub fn product_url(product_id: i64) -> String {
    format!("{}?id={}", Page::Product.file(), product_id)
}

/// Redirige al login si no hay token guardado
pub fn ensure_authenticated(api: &ApiClient) -> bool {
    if api.session().is_authenticated() {
        return true;
    }
    log::warn!("🔒 [AUTH] Sin token, redirigiendo a {}", CONFIG.pages.login_page);
    api.navigator().go_to(&CONFIG.pages.login_page);
    false
}

pub struct App {
    state: AppState,
    root: Element,
    page: Page,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .or_else(|| document().and_then(|d| d.body()).map(Element::from))
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;
        Ok(Self {
            state: AppState::browser(),
            root,
            page: Page::from_path(&location_pathname()),
        })
    }

    pub fn render(&self) -> Result<(), JsValue> {
        log::info!("🧭 [APP] Página: {:?}", self.page);
        if self.page.requires_auth() && !ensure_authenticated(&self.state.api) {
            return Ok(());
        }
        clear_children(&self.root);
        let root = &self.root;
        let state = &self.state;
        match self.page {
            Page::Login => views::render_login(root, state),
            Page::Register => views::render_register(root, state),
            Page::Home => views::render_home(root, state),
            Page::Product => views::render_product(root, state),
            Page::Cart => views::render_cart(root, state),
            Page::Orders => views::render_orders(root, state),
            Page::Profile => views::render_profile(root, state),
            Page::Moderator => views::render_moderator(root, state),
        }
    }
}
