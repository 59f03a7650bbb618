use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Product entity as served by the catalog payload.
///
/// Field names are camelCase on the wire. `rating` is nominally 0.0–5.0 but
/// is not clamped; equality and hashing compare it bitwise so that `Eq` and
/// `Hash` stay consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    /// List price
    pub price: u64,
    /// Price after discount
    pub discount_price: u64,
    /// Discount in percent
    pub discount_rate: u32,
    /// Image URL
    pub image: String,
    /// Product page URL
    pub link: String,
    pub tags: Vec<String>,
    pub benefits: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
}

impl Product {
    /// Whether a discount applies
    pub fn is_discounted(&self) -> bool {
        self.discount_price < self.price
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.brand == other.brand
            && self.price == other.price
            && self.discount_price == other.discount_price
            && self.discount_rate == other.discount_rate
            && self.image == other.image
            && self.link == other.link
            && self.tags == other.tags
            && self.benefits == other.benefits
            && self.rating.to_bits() == other.rating.to_bits()
            && self.review_count == other.review_count
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.brand.hash(state);
        self.price.hash(state);
        self.discount_price.hash(state);
        self.discount_rate.hash(state);
        self.image.hash(state);
        self.link.hash(state);
        self.tags.hash(state);
        self.benefits.hash(state);
        self.rating.to_bits().hash(state);
        self.review_count.hash(state);
    }
}

/// Parameters of the catalog list request (none today)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListRequest {}

/// Parameters of the product detail request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetailRequest {
    pub id: String,
}

impl DetailRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
