use serde::{Deserialize, Serialize};
use crate::utils::serde_helper::lenient_f64;

/// Product as returned by `products/*`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: f64,
    #[serde(default)]
    pub image_path: String,
}

impl Product {
    pub fn category_label(&self) -> String {
        Category::label_for(&self.category)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Catalog categories known to the backend
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    Books,
    Home,
    Health,
    Sport,
    Office,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Electronics,
        Category::Clothing,
        Category::Food,
        Category::Books,
        Category::Home,
        Category::Health,
        Category::Sport,
        Category::Office,
        Category::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Category::Electronics => "ELECTRONICS",
            Category::Clothing => "CLOTHING",
            Category::Food => "FOOD",
            Category::Books => "BOOKS",
            Category::Home => "HOME",
            Category::Health => "HEALTH",
            Category::Sport => "SPORT",
            Category::Office => "OFFICE",
            Category::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Электроника",
            Category::Clothing => "Одежда",
            Category::Food => "Еда",
            Category::Books => "Книги",
            Category::Home => "Дом",
            Category::Health => "Здоровье",
            Category::Sport => "Спорт",
            Category::Office => "Офис",
            Category::Other => "Другое",
        }
    }

    pub fn from_code(code: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Display label; unknown codes are shown verbatim
    pub fn label_for(code: &str) -> String {
        Self::from_code(code)
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| code.to_string())
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Electronics
    }
}

/// Raw values of the home page filter form. Blank fields are left out of
/// the query string.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ProductFilters {
    pub rating_above: String,
    pub min_price: String,
    pub max_price: String,
    pub category: String,
}

impl ProductFilters {
    pub fn by_category(category: &str) -> Self {
        Self {
            category: category.to_string(),
            ..Self::default()
        }
    }

    /// `ratingAbove=4&category=BOOKS` (no leading `?`), empty when no field is set
    pub fn query_string(&self) -> String {
        let mut params = Vec::new();
        let fields = [
            ("ratingAbove", &self.rating_above),
            ("minPrice", &self.min_price),
            ("maxPrice", &self.max_price),
            ("category", &self.category),
        ];
        for (name, value) in fields {
            let value = value.trim();
            if !value.is_empty() {
                params.push(format!("{}={}", name, urlencoding::encode(value)));
            }
        }
        params.join("&")
    }
}

/// `product` part of the multipart `products/add` request
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewProduct {
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub rating: f64,
}

/// Full replacement sent to `products/update_product`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ProductUpdate {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub rating: f64,
    pub image_path: String,
}

impl ProductUpdate {
    /// Editable fields come from the form; category, rating and image path
    /// are kept from the existing product.
    pub fn from_existing(existing: &Product, name: String, description: String, price: f64, stock: i64) -> Self {
        Self {
            id: existing.id,
            category: existing.category.clone(),
            name,
            description,
            price,
            stock,
            rating: existing.rating,
            image_path: existing.image_path.clone(),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct StockChange {
    pub id: i64,
    pub stock: i64,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct PriceChange {
    pub id: i64,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_is_shown_verbatim() {
        assert_eq!(Category::label_for("BOOKS"), "Книги");
        assert_eq!(Category::label_for("GARDEN"), "GARDEN");
        assert_eq!(Category::from_code("OFFICE"), Some(Category::Office));
        assert_eq!(Category::from_code("office"), None);
    }

    #[test]
    fn filter_query_skips_blank_fields() {
        let filters = ProductFilters {
            rating_above: "4".into(),
            min_price: " ".into(),
            max_price: "1000.5".into(),
            category: String::new(),
        };
        assert_eq!(filters.query_string(), "ratingAbove=4&maxPrice=1000.5");
        assert_eq!(ProductFilters::default().query_string(), "");
        assert_eq!(ProductFilters::by_category("HOME").query_string(), "category=HOME");
    }

    #[test]
    fn product_decodes_with_missing_fields() {
        let product: Product = serde_json::from_str(r#"{"id": 9, "name": "Чайник", "price": "4500"}"#).unwrap();
        assert_eq!(product.price, 4500.0);
        assert_eq!(product.stock, 0);
        assert!(!product.in_stock());
        assert_eq!(product.rating, 0.0);
    }

    #[test]
    fn update_keeps_category_rating_and_image() {
        let existing = Product {
            id: 3,
            name: "old".into(),
            category: "FOOD".into(),
            rating: 4.5,
            image_path: "/img/3.png".into(),
            ..Product::default()
        };
        let update = ProductUpdate::from_existing(&existing, "new".into(), "d".into(), 10.0, 2);
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["category"], "FOOD");
        assert_eq!(body["rating"], 4.5);
        assert_eq!(body["image_path"], "/img/3.png");
        assert_eq!(body["name"], "new");
    }
}
