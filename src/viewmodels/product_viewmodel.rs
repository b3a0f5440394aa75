// ============================================================================
// PRODUCT VIEWMODEL - Ficha de producto, reseñas y favoritos
// ============================================================================

use crate::error::{ClientError, ClientResult};
use crate::models::{Product, ReviewRequest, ReviewsPage};
use crate::services::{ApiClient, SyncOutcome};
use crate::stores::FavoritesStore;
use crate::viewmodels::cart_viewmodel::{CartUpdate, CartViewModel};
use crate::viewmodels::wishlist_viewmodel::WishlistViewModel;

pub const MISSING_PRODUCT_ID: &str = "ID товара не указан";
pub const PAGE_LOAD_FAILED: &str = "Ошибка загрузки страницы товара";
pub const CART_ADD_FAILED: &str = "Ошибка добавления в корзину";
pub const WISHLIST_ADD_FAILED: &str = "Ошибка добавления в избранное";
pub const RATING_REQUIRED: &str = "Пожалуйста, выберите оценку";
pub const COMMENT_REQUIRED: &str = "Пожалуйста, напишите комментарий";
pub const REVIEW_ADDED: &str = "Отзыв успешно добавлен";
pub const REVIEW_FAILED: &str = "Ошибка отправки отзыва";
pub const NO_REVIEWS: &str = "Отзывов пока нет. Будьте первым!";
pub const NO_DESCRIPTION: &str = "Описание отсутствует";
/// Delay before going home when the URL carries no id
pub const MISSING_ID_REDIRECT_MS: u32 = 1500;

/// `id` parameter of a `?id=12&...` query string
pub fn parse_product_id(search: &str) -> Option<i64> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .and_then(|(_, value)| value.trim().parse().ok())
}

pub fn review_author(user_id: i64) -> String {
    format!("Пользователь #{}", user_id)
}

pub fn reviews_count_label(count: i64) -> String {
    format!("{} отзывов", count)
}

pub fn description_or_default(product: &Product) -> &str {
    if product.description.trim().is_empty() {
        NO_DESCRIPTION
    } else {
        &product.description
    }
}

/// Rating 1..=5 and a non-blank comment, checked in that order
pub fn validate_review(rating: i64, comment: &str) -> ClientResult<(i64, String)> {
    if !(1..=5).contains(&rating) {
        return Err(ClientError::validation(RATING_REQUIRED));
    }
    let comment = comment.trim();
    if comment.is_empty() {
        return Err(ClientError::validation(COMMENT_REQUIRED));
    }
    Ok((rating, comment.to_string()))
}

#[derive(Clone)]
pub struct ProductViewModel {
    api: ApiClient,
    cart: CartViewModel,
    wishlist: WishlistViewModel,
    favorites: FavoritesStore,
}

impl ProductViewModel {
    pub fn new(api: ApiClient, favorites: FavoritesStore) -> Self {
        Self {
            cart: CartViewModel::new(api.clone()),
            wishlist: WishlistViewModel::new(api.clone()),
            api,
            favorites,
        }
    }

    pub fn cart(&self) -> &CartViewModel {
        &self.cart
    }

    pub fn is_favorite(&self, product_id: i64) -> bool {
        self.favorites.contains(product_id)
    }

    pub fn toggle_favorite(&self, product_id: i64) -> bool {
        self.favorites.toggle(product_id)
    }

    /// Wish list id is needed before anything can be added to it
    pub async fn init(&self) -> SyncOutcome {
        self.wishlist.load().await
    }

    /// Product first, then its reviews; either failing fails the page
    pub async fn load(&self, product_id: i64) -> ClientResult<(Product, ReviewsPage)> {
        log::info!("📄 [PRODUCT] Cargando producto {}", product_id);
        let product = self.api.get_product(product_id).await?;
        let reviews = self.api.product_reviews(product_id).await?;
        Ok((product, reviews))
    }

    pub async fn image(&self, product_id: i64) -> ClientResult<Vec<u8>> {
        self.api.product_image(product_id).await
    }

    pub async fn add_to_cart(&self, product: &Product) -> ClientResult<CartUpdate> {
        if !product.in_stock() {
            return Err(ClientError::validation(CART_ADD_FAILED));
        }
        self.cart.add(product.id, 1).await
    }

    /// Add to the server wish list and mark it as a local favorite
    pub async fn add_to_wishlist(&self, product_id: i64) -> ClientResult<()> {
        if !self.wishlist.contains(product_id) {
            self.wishlist.add(product_id).await?;
        }
        self.favorites.insert(product_id);
        Ok(())
    }

    /// Post the review, then fetch the refreshed overview
    pub async fn submit_review(&self, product_id: i64, rating: i64, comment: &str) -> ClientResult<ReviewsPage> {
        let (rating, comment) = validate_review(rating, comment)?;
        let request = ReviewRequest {
            rating,
            comment,
            user_id: self.api.session().user_id(),
            product_id,
        };
        self.api.make_review(&request).await?;
        self.api.product_reviews(product_id).await
    }
}
