// ============================================================================
// HEADER - Marca, navegación y badge del carrito
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::Page;
use crate::dom::{on_click, set_text_content, set_visible, ElementBuilder};
use crate::state::AppState;

/// Botón de navegación que lleva a `page`
pub fn nav_button(state: &AppState, label: &str, page: Page) -> Result<Element, JsValue> {
    let button = ElementBuilder::new("button")?
        .class("nav-btn")
        .attr("type", "button")?
        .text(label)
        .build();
    let navigator = state.api.navigator();
    on_click(&button, move |_| navigator.go_to(page.file()))?;
    Ok(button)
}

/// Botón del carrito; el contador sigue a `state.cart_badge`
pub fn cart_button(state: &AppState) -> Result<Element, JsValue> {
    let badge = ElementBuilder::new("span")?.class("cart-badge").build();
    paint_badge(&badge, state.cart_badge.get())?;
    {
        let badge = badge.clone();
        state.cart_badge.subscribe(move |count| {
            if let Err(e) = paint_badge(&badge, *count) {
                log::warn!("⚠️ [HEADER] Error actualizando badge: {:?}", e);
            }
        });
    }

    let button = nav_button(state, "🛒 Корзина", Page::Cart)?;
    button.append_child(&badge)?;
    Ok(button)
}

fn paint_badge(badge: &Element, count: Option<i64>) -> Result<(), JsValue> {
    match count {
        Some(n) => {
            set_text_content(badge, &n.to_string());
            set_visible(badge, true, "inline-block")
        }
        None => {
            set_text_content(badge, "");
            set_visible(badge, false, "inline-block")
        }
    }
}

/// Header común: logo (vuelve a home), título y botones de navegación
pub fn render_header(title: &str, nav: Vec<Element>) -> Result<Element, JsValue> {
    let logo = ElementBuilder::new("a")?
        .class("logo")
        .attr("href", Page::Home.file())?
        .text("OSS Shop")
        .build();
    let heading = ElementBuilder::new("h1")?.class("page-title").text(title).build();
    let nav = ElementBuilder::new("nav")?.class("header-nav").children(nav)?.build();

    Ok(ElementBuilder::new("header")?
        .class("app-header")
        .child(logo)?
        .child(heading)?
        .child(nav)?
        .build())
}
