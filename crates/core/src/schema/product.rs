//! Physical products and their reviews.

use serde::{Deserialize, Serialize};

use crate::schema::blog::Author;
use crate::types::{ProductId, ReviewId, Vnd};

/// A product in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub images: Vec<String>,
    pub price: Vnd,
    pub sale_price: Option<Vnd>,
    /// Units left in stock.
    pub quantity: u32,
    pub sold_count: u32,
    pub category: Option<String>,
    pub rating: Option<f64>,
}

impl Product {
    /// Price the buyer pays right now.
    #[must_use]
    pub fn effective_price(&self) -> Vnd {
        self.sale_price.unwrap_or(self.price)
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// A buyer's review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReview {
    pub id: ReviewId,
    pub product_id: ProductId,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub content: String,
    pub user: Author,
    pub created_at: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::{DataResponse, parse};

    #[test]
    fn test_products_parse() {
        let body = r#"{"data": [{
            "id": "p1", "name": "Sổ tay lập trình", "images": ["a.png", "b.png"],
            "price": 90000, "salePrice": null, "quantity": 0, "soldCount": 120,
            "category": "Văn phòng phẩm", "rating": null
        }]}"#;
        let parsed: DataResponse<Vec<Product>> = parse(body).unwrap();
        let product = parsed.data.first().unwrap();
        assert_eq!(product.effective_price(), Vnd::new(90_000));
        assert!(!product.in_stock());
    }

    #[test]
    fn test_review_rating_out_of_range_type() {
        let body = r#"{"data": [{
            "id": "r1", "productId": "p1", "rating": 4.5, "content": "Tốt",
            "user": {"id": "u1", "username": "lan", "avatar": null},
            "createdAt": "2024-05-01T08:00:00Z"
        }]}"#;
        let err = parse::<DataResponse<Vec<ProductReview>>>(body).unwrap_err();
        assert_eq!(err.path, "data[0].rating");
    }
}
