//! Product catalog domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boutique_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Category slug.
    pub category: String,
    /// Optional subcategory slug.
    pub sub_category: Option<String>,
    /// Percentage discount, 0-100.
    pub discount: i32,
    /// Main image URL.
    pub image_url: String,
    /// Marketing bullet points.
    pub benefits: Vec<String>,
    /// Units in stock.
    pub stock: i32,
    /// Brand name.
    pub brand: Option<String>,
    /// Stock keeping unit (unique when present).
    pub sku: Option<String>,
    /// Shelf label.
    pub etiquette: Option<String>,
    /// Usage instructions.
    pub usage: Option<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Field set accepted when creating or replacing a product.
///
/// Field-level constraints (price >= 0, discount 0-100, stock >= 0) are
/// validated here before the row ever reaches the database.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Category slug.
    pub category: String,
    /// Optional subcategory slug.
    pub sub_category: Option<String>,
    /// Percentage discount, 0-100.
    #[serde(default)]
    pub discount: i32,
    /// Main image URL.
    pub image_url: String,
    /// Marketing bullet points.
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Units in stock.
    pub stock: i32,
    /// Brand name.
    pub brand: Option<String>,
    /// Stock keeping unit.
    pub sku: Option<String>,
    /// Shelf label.
    pub etiquette: Option<String>,
    /// Usage instructions.
    pub usage: Option<String>,
}

impl ProductInput {
    /// Check the field-level constraints.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message for the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_owned());
        }
        if self.category.trim().is_empty() {
            return Err("Category is required".to_owned());
        }
        if self.image_url.trim().is_empty() {
            return Err("Image URL is required".to_owned());
        }
        if self.price < Decimal::ZERO {
            return Err("Price must be zero or greater".to_owned());
        }
        if !(0..=100).contains(&self.discount) {
            return Err("Discount must be between 0 and 100".to_owned());
        }
        if self.stock < 0 {
            return Err("Stock must be zero or greater".to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            title: "Shea butter".to_owned(),
            description: None,
            price: Decimal::new(4500, 0),
            category: "skincare".to_owned(),
            sub_category: None,
            discount: 0,
            image_url: "https://cdn.example.com/shea.webp".to_owned(),
            benefits: vec![],
            stock: 12,
            brand: None,
            sku: Some("SHEA-001".to_owned()),
            etiquette: None,
            usage: None,
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut i = input();
        i.price = Decimal::new(-1, 0);
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_discount_bounds() {
        let mut i = input();
        i.discount = 100;
        assert!(i.validate().is_ok());
        i.discount = 101;
        assert!(i.validate().is_err());
        i.discount = -1;
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_negative_stock_rejected() {
        let mut i = input();
        i.stock = -5;
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut i = input();
        i.title = "   ".to_owned();
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_input_accepts_camel_case_json() {
        let json = serde_json::json!({
            "title": "Shea butter",
            "price": "4500",
            "category": "skincare",
            "subCategory": "butters",
            "imageUrl": "https://cdn.example.com/shea.webp",
            "stock": 3
        });
        let parsed: ProductInput = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.sub_category.as_deref(), Some("butters"));
        assert_eq!(parsed.discount, 0);
    }
}
