// ============================================================================
// NAVIGATION - Cambios de página (window.location)
// ============================================================================

/// Full-page navigation. Every page of the storefront is its own HTML
/// document, so moving between them is a plain `location.href` change.
pub trait Navigator {
    fn go_to(&self, url: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn go_to(&self, url: &str) {
        log::info!("🧭 [NAV] Navegando a {}", url);
        let Some(window) = web_sys::window() else {
            log::error!("❌ [NAV] window no disponible");
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            log::error!("❌ [NAV] No se pudo navegar a {}: {:?}", url, e);
        }
    }
}

#[cfg(test)]
pub use recording::RecordingNavigator;
