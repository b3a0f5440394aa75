// ============================================================================
// CART VIEWMODEL - Carrito: caché + recarga completa tras cada mutación
// ============================================================================
// Nunca se modifica el snapshot localmente: toda mutación termina con una
// recarga del servidor, y el badge del header refleja esa última recarga.
// ============================================================================

use std::rc::Rc;
use crate::error::{ClientError, ClientResult};
use crate::models::{AddCartItemRequest, CartItem, CartSnapshot, Product, RemoveCartItemRequest};
use crate::services::{ApiClient, SnapshotCache, SyncOutcome};
use crate::utils::constants::LS_CART_KEY;
use crate::utils::i18n::format_price;

pub const CART_ITEM_ADDED: &str = "Товар добавлен в корзину";
pub const CART_ITEM_REMOVED: &str = "Товар удалён из корзины";
pub const CART_NOT_FOUND: &str = "Корзина не найдена";
pub const CART_ADD_FAILED: &str = "Ошибка добавления товара";
pub const CART_REMOVE_FAILED: &str = "Ошибка удаления товара";
pub const CART_REMOVE_CONFIRM: &str = "Удалить товар из корзины?";
pub const CHECKOUT_PENDING: &str = "Функция оформления заказа будет реализована позже";
pub const PRODUCT_MISSING: &str = "Товар не найден";
pub const CART_RELOAD_FAILED: &str = "Не удалось обновить корзину";

/// Outcome of a mutation the server accepted. The follow-up reload may
/// still fail, and the view must say so instead of repainting stale data.
#[derive(Debug, Clone, PartialEq)]
pub enum CartUpdate {
    Synced(CartSnapshot),
    ReloadFailed(ClientError),
}

/// Cart line enriched with its product (when the lookup succeeded)
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Option<Product>,
}

impl CartLine {
    pub fn name(&self) -> String {
        self.product
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| PRODUCT_MISSING.to_string())
    }

    pub fn price_label(&self) -> String {
        self.product
            .as_ref()
            .map(|p| format_price(p.price))
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct CartViewModel {
    api: ApiClient,
    cache: Rc<SnapshotCache<CartSnapshot>>,
}

impl CartViewModel {
    pub fn new(api: ApiClient) -> Self {
        let cache = Rc::new(SnapshotCache::new(api.session().storage(), LS_CART_KEY));
        Self { api, cache }
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.cache.current()
    }

    /// Snapshot persisted by an earlier page, if any
    pub fn cached(&self) -> Option<CartSnapshot> {
        self.cache.persisted()
    }

    /// Paint from cache, fetch cart + items + count, repaint
    pub async fn load<P: FnMut(&CartSnapshot)>(&self, paint: P) -> SyncOutcome {
        let api = self.api.clone();
        let user_id = api.session().user_id();
        let outcome = self.cache.load(|| fetch_snapshot(api, user_id), paint).await;
        if let Some(e) = outcome.error() {
            log::error!("❌ [CART] Error cargando carrito: {}", e);
        }
        outcome
    }

    /// Add `quantity` of a product, then reload. Without a known cart the
    /// cart is fetched first; id 0 lets the backend create one.
    pub async fn add(&self, product_id: i64, quantity: i64) -> ClientResult<CartUpdate> {
        let user_id = self.api.session().user_id();
        let cart_id = match self.cache.current().cart_id {
            Some(id) => id,
            None => match self.api.get_cart(user_id).await {
                Ok(cart) => cart.id.unwrap_or(0),
                Err(e) if e.is_unauthorized() => return Err(e),
                Err(e) => {
                    log::warn!("⚠️ [CART] Carrito no encontrado, se creará: {}", e);
                    0
                }
            },
        };
        let request = AddCartItemRequest {
            id: 0,
            quantity,
            user_id,
            cart_id,
            product_id,
        };
        self.api.add_cart_item(&request).await?;
        Ok(self.reload_after_mutation().await)
    }

    pub async fn remove(&self, cart_item_id: i64) -> ClientResult<CartUpdate> {
        let cart_id = self
            .cache
            .current()
            .cart_id
            .filter(|id| *id != 0)
            .ok_or_else(|| ClientError::validation(CART_NOT_FOUND))?;
        self.api
            .remove_cart_item(&RemoveCartItemRequest { cart_id, cart_item_id })
            .await?;
        Ok(self.reload_after_mutation().await)
    }

    /// `+`: one more of the same product
    pub async fn increment(&self, cart_item_id: i64) -> ClientResult<CartUpdate> {
        let product_id = self
            .cache
            .current()
            .find(cart_item_id)
            .map(|item| item.product_id)
            .ok_or_else(|| ClientError::validation(PRODUCT_MISSING))?;
        self.add(product_id, 1).await
    }

    /// `−` drops the line; only a single-unit line asks first
    pub fn decrement_needs_confirm(&self, cart_item_id: i64) -> bool {
        self.cache
            .current()
            .find(cart_item_id)
            .map(|item| item.quantity <= 1)
            .unwrap_or(false)
    }

    /// Product details for every line; lookup failures leave `product` empty
    pub async fn lines(&self, snapshot: &CartSnapshot) -> Vec<CartLine> {
        let mut lines = Vec::with_capacity(snapshot.items.len());
        for item in &snapshot.items {
            let product = match self.api.get_product(item.product_id).await {
                Ok(p) => Some(p),
                Err(e) => {
                    log::warn!("⚠️ [CART] Producto {} no disponible: {}", item.product_id, e);
                    None
                }
            };
            lines.push(CartLine { item: item.clone(), product });
        }
        lines
    }

    pub async fn product_image(&self, product_id: i64) -> ClientResult<Vec<u8>> {
        self.api.product_image(product_id).await
    }

    /// Checkout is only acknowledged, never sent
    pub fn checkout_message(&self) -> Option<&'static str> {
        (!self.cache.current().is_empty()).then_some(CHECKOUT_PENDING)
    }

    /// Aviso para una recarga fallida, con la hora de la última sincronización
    pub fn reload_failed_message(&self) -> String {
        match self.cache.synced_label() {
            Some(at) => format!("{} (данные от {})", CART_RELOAD_FAILED, at),
            None => CART_RELOAD_FAILED.to_string(),
        }
    }

    async fn reload_after_mutation(&self) -> CartUpdate {
        match self.load(|_| {}).await {
            SyncOutcome::Fresh => CartUpdate::Synced(self.cache.current()),
            SyncOutcome::Stale(e) | SyncOutcome::Empty(e) => {
                log::warn!("⚠️ [CART] Mutación aplicada, recarga fallida: {}", e);
                CartUpdate::ReloadFailed(e)
            }
        }
    }
}

async fn fetch_snapshot(api: ApiClient, user_id: i64) -> ClientResult<CartSnapshot> {
    let cart = api.get_cart(user_id).await?;
    let items = api.get_cart_items(user_id).await?;
    let total_items = match cart.id {
        Some(id) if id != 0 => api.total_cart_items(id).await?,
        _ => items.len() as i64,
    };
    log::info!("🛒 [CART] {} líneas, {} artículos", items.len(), total_items);
    Ok(CartSnapshot {
        cart_id: cart.id,
        items,
        total_price: cart.total_price,
        total_items,
    })
}

/// `"12.50 ₸"`, `"0.00 ₸"` for an empty cart
pub fn total_label(snapshot: &CartSnapshot) -> String {
    format_price(snapshot.total_price)
}
