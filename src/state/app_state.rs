// ============================================================================
// APP STATE - Contexto compartido entre renderers
// ============================================================================

use crate::models::CartSnapshot;
use crate::services::ApiClient;
use crate::state::Reactive;
use crate::stores::FavoritesStore;

/// Lo que cada página recibe al arrancar
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub favorites: FavoritesStore,
    /// Contador del icono del carrito; `None` lo oculta
    pub cart_badge: Reactive<Option<i64>>,
}

impl AppState {
    pub fn new(api: ApiClient) -> Self {
        let favorites = FavoritesStore::load(api.session().storage());
        Self {
            api,
            favorites,
            cart_badge: Reactive::new(None),
        }
    }

    pub fn browser() -> Self {
        Self::new(ApiClient::browser())
    }

    pub fn show_cart(&self, snapshot: &CartSnapshot) {
        self.cart_badge.set(snapshot.badge());
    }
}
