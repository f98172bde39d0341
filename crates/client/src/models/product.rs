//! Product catalog types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bramblefig_core::{ProductId, ReviewId, UserId};

/// A product as served by the catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend-issued product id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Struck-through previous price, when the product is discounted.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub old_price: Option<Decimal>,
    /// "New arrival" badge flag.
    #[serde(default)]
    pub is_new: Option<bool>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub num_reviews: u32,
    #[serde(default)]
    pub count_in_stock: u32,
    /// Present on the detail endpoint; list endpoints omit it.
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether at least one unit can be added to the cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.count_in_stock > 0
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    /// Id of the reviewing user.
    pub user: UserId,
    /// Display name captured at review time.
    pub name: String,
    pub rating: u32,
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Pagination envelope returned by the product list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
}

/// Envelope returned by the category listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_backend_shape() {
        let json = r#"{
            "_id": "7",
            "name": "Walnut Desk Organizer",
            "image": "/images/organizer.jpg",
            "brand": "Bramblefig",
            "category": "Office",
            "description": "Solid walnut, five compartments.",
            "price": 49.99,
            "rating": 4.5,
            "numReviews": 12,
            "countInStock": 3,
            "reviews": []
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.price, Decimal::new(4999, 2));
        assert_eq!(product.num_reviews, 12);
        assert!(product.in_stock());
        assert!(product.old_price.is_none());
    }

    #[test]
    fn test_product_tolerates_sparse_list_entries() {
        // List endpoints omit reviews, description, and timestamps.
        let json = r#"{"_id": "1", "name": "Mug", "image": "/images/mug.jpg", "price": 8}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.reviews.is_empty());
        assert_eq!(product.count_in_stock, 0);
        assert!(!product.in_stock());
    }

    #[test]
    fn test_product_page_envelope() {
        let json = r#"{
            "products": [{"_id": "1", "name": "Mug", "image": "/i.jpg", "price": 8.5}],
            "page": 1,
            "pages": 4
        }"#;
        let page: ProductPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.pages, 4);
    }
}
