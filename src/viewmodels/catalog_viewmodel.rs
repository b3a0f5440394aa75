// ============================================================================
// CATALOG VIEWMODEL - Página principal: top 10, búsqueda, categorías, filtros
// ============================================================================

use crate::error::ClientResult;
use crate::models::{Product, ProductFilters};
use crate::services::{ApiClient, SyncOutcome};
use crate::viewmodels::wishlist_viewmodel::WishlistViewModel;

pub const GRID_LOADING: &str = "Загружаем товары...";
pub const GRID_EMPTY: &str = "Товары не найдены.";
pub const TOP_EMPTY: &str = "Нет популярных товаров.";
pub const SEARCH_FAILED: &str = "Ошибка поиска товаров";
pub const CATEGORY_FAILED: &str = "Ошибка загрузки товаров по категории";
pub const FILTERS_FAILED: &str = "Ошибка применения фильтров";
pub const TOP_FAILED: &str = "Не удалось загрузить популярные товары";
pub const FAVORITES_PAGE_PENDING: &str = "Страница избранного в разработке";
pub const ORDERS_PAGE_PENDING: &str = "Страница заказов в разработке";

/// Status line above the product grid
pub fn grid_status(found: usize) -> String {
    if found == 0 {
        GRID_EMPTY.to_string()
    } else {
        format!("Найдено товаров: {}", found)
    }
}

/// Trimmed query, `None` when there is nothing to search for
pub fn normalize_query(raw: &str) -> Option<String> {
    let query = raw.trim();
    (!query.is_empty()).then(|| query.to_string())
}

#[derive(Clone)]
pub struct CatalogViewModel {
    api: ApiClient,
    wishlist: WishlistViewModel,
}

impl CatalogViewModel {
    pub fn new(api: ApiClient) -> Self {
        let wishlist = WishlistViewModel::new(api.clone());
        Self { api, wishlist }
    }

    pub fn wishlist(&self) -> &WishlistViewModel {
        &self.wishlist
    }

    /// Wishlist goes first so the cards render with the right heart state
    pub async fn init(&self) -> SyncOutcome {
        self.wishlist.load().await
    }

    pub async fn top_products(&self) -> ClientResult<Vec<Product>> {
        self.api.top_products().await
    }

    /// `None` when the query is blank and nothing was sent
    pub async fn search(&self, raw: &str) -> ClientResult<Option<Vec<Product>>> {
        match normalize_query(raw) {
            Some(query) => self.api.search_products(&query).await.map(Some),
            None => Ok(None),
        }
    }

    /// Category pill; the "all" pill carries an empty code
    pub async fn by_category(&self, code: &str) -> ClientResult<Vec<Product>> {
        self.api.filter_products(&ProductFilters::by_category(code)).await
    }

    pub async fn apply_filters(&self, filters: &ProductFilters) -> ClientResult<Vec<Product>> {
        log::info!("🔎 [CATALOG] Filtros: {:?}", filters);
        self.api.filter_products(filters).await
    }

    pub async fn product_image(&self, product_id: i64) -> ClientResult<Vec<u8>> {
        self.api.product_image(product_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api_client::tests::Harness;
    use crate::services::HttpMethod;
    use serde_json::json;

    #[test]
    fn status_line_counts_results() {
        assert_eq!(grid_status(0), GRID_EMPTY);
        assert_eq!(grid_status(3), "Найдено товаров: 3");
    }

    #[tokio::test]
    async fn blank_search_sends_nothing() {
        let h = Harness::new();
        let vm = CatalogViewModel::new(h.api.clone());
        assert_eq!(vm.search("   ").await.unwrap(), None);
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn search_trims_query() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Get, &h.url("products/search?keyword=tea"), 200, json!([{"id": 1}]));
        let vm = CatalogViewModel::new(h.api.clone());
        assert_eq!(vm.search("  tea ").await.unwrap().map(|p| p.len()), Some(1));
    }

    #[tokio::test]
    async fn all_pill_filters_without_category() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Get, &h.url("products/filter"), 200, json!([]));
        h.transport.mock_response(HttpMethod::Get, &h.url("products/filter?category=FOOD"), 200, json!([{"id": 2}]));
        let vm = CatalogViewModel::new(h.api.clone());

        assert!(vm.by_category("").await.unwrap().is_empty());
        assert_eq!(vm.by_category("FOOD").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn filter_form_skips_blank_fields() {
        let h = Harness::new();
        let url = h.url("products/filter?ratingAbove=4&maxPrice=100");
        h.transport.mock_response(HttpMethod::Get, &url, 200, json!([]));
        let vm = CatalogViewModel::new(h.api.clone());
        let filters = ProductFilters {
            rating_above: "4".into(),
            min_price: " ".into(),
            max_price: "100".into(),
            category: String::new(),
        };
        vm.apply_filters(&filters).await.unwrap();
        assert_eq!(h.transport.sent(HttpMethod::Get, &url).len(), 1);
    }

    #[tokio::test]
    async fn init_loads_wishlist_first() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Get, &h.url("wish_lists/4"), 200, json!({"id": 1, "items": [{"id": 7, "product_id": 3}]}));
        let vm = CatalogViewModel::new(h.api.clone());
        assert!(vm.init().await.is_fresh());
        assert!(vm.wishlist().contains(3));
    }
}
