// ============================================================================
// TEXTOS Y FORMATO - Russian UI strings and number formatting
// ============================================================================

use crate::config::CONFIG;

/// `1234.5` -> `"1234.50 ₸"`
pub fn format_price(amount: f64) -> String {
    format!("{:.2} {}", amount, CONFIG.currency_symbol)
}

/// Ratings are shown with one decimal
pub fn format_rating(rating: f64) -> String {
    format!("{:.1}", rating)
}

/// Stock badge for the product detail page: (css class, text)
pub fn stock_badge(stock: i64) -> (&'static str, String) {
    if stock > 10 {
        ("in-stock", format!("В наличии: {} шт.", stock))
    } else if stock > 0 {
        ("low-stock", format!("Осталось: {} шт.", stock))
    } else {
        ("out-of-stock", "Нет в наличии".to_string())
    }
}

/// Stock line used on catalog and cart cards
pub fn stock_line(stock: i64) -> String {
    format!("На складе: {}", stock)
}

/// Avatar initials, `U` when both names are empty
pub fn initials(first_name: &str, last_name: &str) -> String {
    let pick = |s: &str| s.trim().chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
    let value = format!("{}{}", pick(first_name), pick(last_name));
    if value.is_empty() {
        "U".to_string()
    } else {
        value
    }
}

/// Dash placeholder for empty profile fields
pub fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "—"
    } else {
        value
    }
}
