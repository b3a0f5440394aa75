// ============================================================================
// MODERATOR VIEWMODEL - Gestión de productos por categoría
// ============================================================================
// Toda mutación va seguida de una recarga de la categoría actual. Un fallo
// de la recarga no anula la mutación: se informa aparte.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::error::{ClientError, ClientResult};
use crate::models::{Category, NewProduct, Product, ProductUpdate};
use crate::services::{ApiClient, ImageUpload};

pub const INVALID_STOCK: &str = "Неверное количество";
pub const INVALID_PRICE: &str = "Неверная цена";
pub const STOCK_UPDATED: &str = "Количество обновлено";
pub const PRICE_UPDATED: &str = "Цена обновлена";
pub const STOCK_UPDATE_FAILED: &str = "Ошибка обновления количества";
pub const PRICE_UPDATE_FAILED: &str = "Ошибка обновления цены";
pub const DELETE_CONFIRM: &str = "Удалить этот товар?";
pub const PRODUCT_DELETED: &str = "Товар удалён";
pub const DELETE_FAILED: &str = "Ошибка удаления товара";
pub const FORM_FIELDS_REQUIRED: &str = "Заполните все поля";
pub const FORM_NUMBERS_INVALID: &str = "Проверьте цену и количество";
pub const PRODUCT_CREATED: &str = "Товар добавлен";
pub const PRODUCT_UPDATED: &str = "Товар обновлён";
pub const PRODUCT_NOT_FOUND: &str = "Товар не найден";
pub const SAVE_FAILED: &str = "Ошибка сохранения";
pub const RELOAD_FAILED: &str = "Не удалось обновить список товаров";

/// Non-negative whole number
pub fn parse_stock(raw: &str) -> ClientResult<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|stock| *stock >= 0)
        .ok_or_else(|| ClientError::validation(INVALID_STOCK))
}

/// Non-negative finite price
pub fn parse_price(raw: &str) -> ClientResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
        .ok_or_else(|| ClientError::validation(INVALID_PRICE))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Добавить товар",
            FormMode::Edit(_) => "Редактировать товар",
        }
    }

    /// Category and image are fixed once a product exists
    pub fn locks_category_and_image(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// Product modal values as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            category: product.category.clone(),
        }
    }

    pub fn validate(&self) -> ClientResult<ValidProduct> {
        let fields = [&self.name, &self.description, &self.price, &self.stock, &self.category];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ClientError::validation(FORM_FIELDS_REQUIRED));
        }
        let numbers = parse_price(&self.price).and_then(|price| Ok((price, parse_stock(&self.stock)?)));
        let (price, stock) = numbers.map_err(|_| ClientError::validation(FORM_NUMBERS_INVALID))?;
        Ok(ValidProduct {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            stock,
            category: self.category.trim().to_string(),
        })
    }
}

/// Outcome of the reload that follows a successful mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Reload {
    Done(Vec<Product>),
    Failed(ClientError),
}

#[derive(Clone)]
pub struct ModeratorViewModel {
    api: ApiClient,
    category: Rc<RefCell<String>>,
    products: Rc<RefCell<Vec<Product>>>,
}

impl ModeratorViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            category: Rc::new(RefCell::new(Category::default().code().to_string())),
            products: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn category(&self) -> String {
        self.category.borrow().clone()
    }

    pub fn set_category(&self, code: &str) {
        *self.category.borrow_mut() = code.to_string();
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.borrow().clone()
    }

    pub fn find(&self, product_id: i64) -> Option<Product> {
        self.products.borrow().iter().find(|p| p.id == product_id).cloned()
    }

    /// `GET products/category?category=<current>`
    pub async fn reload(&self) -> ClientResult<Vec<Product>> {
        let category = self.category();
        let list = self.api.products_by_category(&category).await?;
        log::info!("🗂️ [MODERATOR] {} productos en {}", list.len(), category);
        *self.products.borrow_mut() = list.clone();
        Ok(list)
    }

    pub async fn change_stock(&self, product_id: i64, raw: &str) -> ClientResult<Reload> {
        let stock = parse_stock(raw)?;
        self.api.change_stock(product_id, stock).await?;
        Ok(self.reload_after_mutation().await)
    }

    pub async fn change_price(&self, product_id: i64, raw: &str) -> ClientResult<Reload> {
        let price = parse_price(raw)?;
        self.api.change_price(product_id, price).await?;
        Ok(self.reload_after_mutation().await)
    }

    pub async fn delete(&self, product_id: i64) -> ClientResult<Reload> {
        self.api.delete_product(product_id).await?;
        Ok(self.reload_after_mutation().await)
    }

    /// Create (multipart, rating 0) or full replace keeping category,
    /// rating and image path of the existing product
    pub async fn save(&self, mode: FormMode, form: &ProductForm, image: Option<ImageUpload>) -> ClientResult<Reload> {
        let valid = form.validate()?;
        match mode {
            FormMode::Create => {
                let product = NewProduct {
                    category: valid.category,
                    name: valid.name,
                    description: valid.description,
                    price: valid.price,
                    stock: valid.stock,
                    rating: 0.0,
                };
                self.api.add_product(&product, image).await?;
            }
            FormMode::Edit(product_id) => {
                let existing = self
                    .find(product_id)
                    .ok_or_else(|| ClientError::validation(PRODUCT_NOT_FOUND))?;
                let update = ProductUpdate::from_existing(&existing, valid.name, valid.description, valid.price, valid.stock);
                self.api.update_product(&update).await?;
            }
        }
        Ok(self.reload_after_mutation().await)
    }

    pub fn logout(&self, login_page: &str) {
        self.api.session().clear();
        self.api.navigator().go_to(login_page);
    }

    async fn reload_after_mutation(&self) -> Reload {
        match self.reload().await {
            Ok(list) => Reload::Done(list),
            Err(e) => {
                log::error!("❌ [MODERATOR] Recarga fallida: {}", e);
                Reload::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api_client::tests::Harness;
    use crate::services::http::RequestBody;
    use crate::services::HttpMethod;
    use serde_json::json;

    fn form() -> ProductForm {
        ProductForm {
            name: "Чайник".into(),
            description: "1.7 л".into(),
            price: "9990".into(),
            stock: "4".into(),
            category: "HOME".into(),
        }
    }

    fn with_list(h: &Harness) -> ModeratorViewModel {
        h.transport.mock_response(HttpMethod::Get, &h.url("products/category?category=ELECTRONICS"), 200, json!([
            {"id": 1, "name": "Phone", "description": "d", "category": "ELECTRONICS",
             "price": 100, "stock": 2, "rating": 4.5, "image_path": "img/1.png"}
        ]));
        ModeratorViewModel::new(h.api.clone())
    }

    #[test]
    fn inline_parsers() {
        assert_eq!(parse_stock("0"), Ok(0));
        assert_eq!(parse_stock("-1"), Err(ClientError::validation(INVALID_STOCK)));
        assert_eq!(parse_stock("2.5"), Err(ClientError::validation(INVALID_STOCK)));
        assert_eq!(parse_price("0"), Ok(0.0));
        assert_eq!(parse_price("x"), Err(ClientError::validation(INVALID_PRICE)));
        assert_eq!(parse_price("-0.5"), Err(ClientError::validation(INVALID_PRICE)));
    }

    #[test]
    fn form_rules() {
        let mut missing = form();
        missing.description = " ".into();
        assert_eq!(missing.validate(), Err(ClientError::validation(FORM_FIELDS_REQUIRED)));

        let mut negative = form();
        negative.stock = "-2".into();
        assert_eq!(negative.validate(), Err(ClientError::validation(FORM_NUMBERS_INVALID)));

        assert_eq!(form().validate().map(|v| (v.price, v.stock)), Ok((9990.0, 4)));
        assert!(FormMode::Edit(1).locks_category_and_image());
        assert_eq!(FormMode::Create.title(), "Добавить товар");
    }

    #[tokio::test]
    async fn default_category_is_electronics() {
        let h = Harness::new();
        let vm = with_list(&h);
        assert_eq!(vm.category(), "ELECTRONICS");
        assert_eq!(vm.reload().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn edit_keeps_category_rating_and_image() {
        let h = Harness::new();
        let vm = with_list(&h);
        vm.reload().await.unwrap();
        h.transport.mock_response(HttpMethod::Put, &h.url("products/update_product"), 200, json!({}));

        let reload = vm.save(FormMode::Edit(1), &form(), None).await.unwrap();

        assert!(matches!(reload, Reload::Done(_)));
        let sent = h.transport.sent(HttpMethod::Put, &h.url("products/update_product"));
        assert_eq!(sent[0].json_body(), Some(json!({
            "id": 1, "category": "ELECTRONICS", "name": "Чайник", "description": "1.7 л",
            "price": 9990.0, "stock": 4, "rating": 4.5, "image_path": "img/1.png"
        })));
    }

    #[tokio::test]
    async fn edit_of_unknown_product_is_rejected() {
        let h = Harness::new();
        let vm = ModeratorViewModel::new(h.api.clone());
        let err = vm.save(FormMode::Edit(99), &form(), None).await.unwrap_err();
        assert_eq!(err, ClientError::validation(PRODUCT_NOT_FOUND));
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn create_sends_multipart_with_zero_rating() {
        let h = Harness::new();
        let vm = with_list(&h);
        h.transport.mock_response(HttpMethod::Post, &h.url("products/add"), 200, json!({}));

        vm.save(FormMode::Create, &form(), None).await.unwrap();

        let sent = h.transport.sent(HttpMethod::Post, &h.url("products/add"));
        let RequestBody::Multipart(parts) = &sent[0].body else { panic!("expected multipart") };
        assert_eq!(parts.len(), 1);
        let product: serde_json::Value = serde_json::from_slice(&parts[0].bytes).unwrap();
        assert_eq!(product["rating"], 0.0);
        assert_eq!(product["category"], "HOME");
    }

    #[tokio::test]
    async fn mutation_survives_failed_reload() {
        let h = Harness::new();
        h.transport.mock_response(HttpMethod::Patch, &h.url("products/change_stock"), 200, json!({}));
        h.transport.mock_network_error(HttpMethod::Get, &h.url("products/category?category=ELECTRONICS"));
        let vm = ModeratorViewModel::new(h.api.clone());

        let reload = vm.change_stock(1, "7").await.unwrap();

        assert!(matches!(reload, Reload::Failed(ClientError::Network(_))));
    }

    #[tokio::test]
    async fn invalid_inline_edit_sends_nothing() {
        let h = Harness::new();
        let vm = ModeratorViewModel::new(h.api.clone());
        assert!(vm.change_price(1, "-3").await.is_err());
        assert!(vm.change_stock(1, "abc").await.is_err());
        assert_eq!(h.transport.request_count(), 0);
    }

    #[tokio::test]
    async fn delete_reloads_current_category() {
        let h = Harness::new();
        h.transport.mock_text(HttpMethod::Delete, &h.url("products/delete/1"), 200, "");
        h.transport.mock_response(HttpMethod::Get, &h.url("products/category?category=BOOKS"), 200, json!([]));
        let vm = ModeratorViewModel::new(h.api.clone());
        vm.set_category("BOOKS");

        assert_eq!(vm.delete(1).await.unwrap(), Reload::Done(Vec::new()));
    }
}
