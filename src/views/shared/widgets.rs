// ============================================================================
// WIDGETS - Formularios, skeletons, estados vacíos e imágenes
// ============================================================================

use std::future::Future;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{clear_children, object_url_from_bytes, set_attribute, set_disabled, set_text_content, set_visible, ElementBuilder};
use crate::error::ClientResult;

const IMAGE_MIME: &str = "image/jpeg";

/// `<input>` con tipo, nombre y placeholder
pub fn input(kind: &str, name: &str, placeholder: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("input")?
        .class("form-input")
        .attr("type", kind)?
        .attr("name", name)?
        .attr("placeholder", placeholder)?
        .build())
}

/// Grupo `label + control`
pub fn labeled(label: &str, control: &Element) -> Result<Element, JsValue> {
    let label = ElementBuilder::new("label")?.class("form-label").text(label).build();
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(label)?
        .child(control.clone())?
        .build())
}

pub fn button(class: &str, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class(class)
        .attr("type", "button")?
        .text(text)
        .build())
}

pub fn submit_button(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text(text)
        .build())
}

/// Párrafo de error de formulario, oculto hasta que haya mensaje
pub fn inline_error() -> Result<Element, JsValue> {
    let el = ElementBuilder::new("p")?.class("form-error").build();
    set_visible(&el, false, "block")?;
    Ok(el)
}

pub fn show_inline_error(el: &Element, message: Option<&str>) {
    set_text_content(el, message.unwrap_or(""));
    if let Err(e) = set_visible(el, message.is_some(), "block") {
        log::warn!("⚠️ [FORM] Error mostrando error inline: {:?}", e);
    }
}

/// Desactiva el botón y cambia su texto mientras dura la llamada
pub fn set_busy(button: &Element, busy: bool, label: &str) {
    if let Err(e) = set_disabled(button, busy) {
        log::warn!("⚠️ [FORM] Error cambiando disabled: {:?}", e);
    }
    set_text_content(button, label);
}

/// Rellena `container` con `count` tarjetas esqueleto
pub fn fill_skeletons(container: &Element, count: usize, class: &str) -> Result<(), JsValue> {
    clear_children(container);
    for _ in 0..count {
        let card = ElementBuilder::new("div")?.class(class).build();
        container.append_child(&card)?;
    }
    Ok(())
}

/// Mensaje centrado en lugar de una lista
pub fn show_empty(container: &Element, text: &str) -> Result<(), JsValue> {
    clear_children(container);
    let empty = ElementBuilder::new("div")?.class("empty-state").text(text).build();
    container.append_child(&empty)?;
    Ok(())
}

/// `<img>` cuyo `src` llega después como blob URL
pub fn lazy_image<F>(alt: &str, fetch: F) -> Result<Element, JsValue>
where
    F: Future<Output = ClientResult<Vec<u8>>> + 'static,
{
    let img = ElementBuilder::new("img")?
        .class("product-image")
        .attr("alt", alt)?
        .build();
    let target = img.clone();
    spawn_local(async move {
        match fetch.await {
            Ok(bytes) if !bytes.is_empty() => {
                match object_url_from_bytes(&bytes, IMAGE_MIME) {
                    Ok(url) => {
                        if let Err(e) = set_attribute(&target, "src", &url) {
                            log::warn!("⚠️ [IMG] Error asignando src: {:?}", e);
                        }
                    }
                    Err(e) => log::warn!("⚠️ [IMG] Error creando blob URL: {:?}", e),
                }
            }
            Ok(_) => log::info!("🖼️ [IMG] Imagen vacía, se deja el placeholder"),
            Err(e) => log::warn!("⚠️ [IMG] Error cargando imagen: {}", e),
        }
    });
    Ok(img)
}
