use serde::{Deserialize, Serialize};
use crate::utils::serde_helper::lenient_f64;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Review {
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

impl Review {
    /// `★★★`; out-of-range ratings are clamped to 0..=5
    pub fn stars(&self) -> String {
        "★".repeat(self.rating.clamp(0, 5) as usize)
    }
}

/// `GET reviews/{productId}`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsPage {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub overall_rating: f64,
    #[serde(default)]
    pub number_of_reviews: i64,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// `POST reviews/make_review`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ReviewRequest {
    pub rating: i64,
    pub comment: String,
    pub user_id: i64,
    pub product_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_decodes_and_stars_clamp() {
        let page: ReviewsPage = serde_json::from_str(
            r#"{"overallRating": 4.25, "numberOfReviews": 2,
                "reviews": [{"user_id": 1, "rating": 5, "comment": "ok"}, {"user_id": 2, "rating": 9, "comment": ""}]}"#,
        ).unwrap();
        assert_eq!(page.number_of_reviews, 2);
        assert_eq!(page.reviews[0].stars(), "★★★★★");
        assert_eq!(page.reviews[1].stars(), "★★★★★");

        let empty: ReviewsPage = serde_json::from_str("{}").unwrap();
        assert!(empty.reviews.is_empty());
    }
}
