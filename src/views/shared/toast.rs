// ============================================================================
// TOAST - Mensajes transitorios
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use crate::config::CONFIG;
use crate::dom::{document, ElementBuilder};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

/// Muestra un toast que desaparece solo tras `toast_duration_ms`
pub fn show_toast(message: &str, kind: ToastKind) {
    if let Err(e) = try_show_toast(message, kind) {
        log::warn!("⚠️ [TOAST] No se pudo mostrar '{}': {:?}", message, e);
    }
}

fn try_show_toast(message: &str, kind: ToastKind) -> Result<(), JsValue> {
    let body = document()
        .and_then(|d| d.body())
        .ok_or_else(|| JsValue::from_str("No body"))?;
    let toast = ElementBuilder::new("div")?
        .class(kind.class())
        .attr("role", "status")?
        .text(message)
        .build();
    body.append_child(&toast)?;

    Timeout::new(CONFIG.ui_config.toast_duration_ms, move || toast.remove()).forget();
    Ok(())
}

pub fn toast_success(message: &str) {
    show_toast(message, ToastKind::Success);
}

pub fn toast_error(message: &str) {
    show_toast(message, ToastKind::Error);
}

pub fn toast_info(message: &str) {
    show_toast(message, ToastKind::Info);
}
