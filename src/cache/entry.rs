//! Cached payloads
//!
//! A cache slot holds either a robot-check marker or a finished product record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Literal stored when a product has no rating
pub const NOT_RATED: &str = "not rated";

/// One cache slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CacheEntry {
    /// The last fetch of this page was answered with a robot-check challenge
    DetectionMarker { detected_at: DateTime<Utc> },

    /// A fully extracted product page
    Product(ProductRecord),
}

impl CacheEntry {
    /// Creates a marker stamped with the given detection time
    pub fn marker(detected_at: DateTime<Utc>) -> Self {
        Self::DetectionMarker { detected_at }
    }

    /// Returns the detection time if this is a marker
    pub fn detected_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DetectionMarker { detected_at } => Some(*detected_at),
            Self::Product(_) => None,
        }
    }

    /// Returns the product record if this slot holds one
    pub fn as_product(&self) -> Option<&ProductRecord> {
        match self {
            Self::Product(record) => Some(record),
            Self::DetectionMarker { .. } => None,
        }
    }
}

/// Structured data extracted from a product page
///
/// Every extracted field is independent: a field that could not be found holds
/// its fallback value and does not affect the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// The page that was fetched
    pub url: String,

    /// Product title
    pub title: Option<String>,

    /// "Our price", one entry or two for range pricing
    pub list_price: Vec<String>,

    /// Sale price, falling back to the list price
    pub current_price: Option<String>,

    /// Rating summary tokens
    pub stars: Stars,

    /// Feature bullets in document order
    pub features: Vec<String>,

    /// Large renditions of the gallery thumbnails
    pub images: Vec<String>,

    /// Number of customer reviews
    pub reviews: u64,

    /// Best sellers rank line
    pub best_seller_rank: Option<String>,

    /// Stock level probe; never populated
    pub inventory: Option<u64>,

    /// When the page was extracted
    pub parsed_at: DateTime<Utc>,
}

/// Rating summary
///
/// Serialized as an array of tokens, or as the string `"not rated"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StarsRepr", into = "StarsRepr")]
pub enum Stars {
    Rated(Vec<String>),
    NotRated,
}

impl Stars {
    /// Builds a rating from tokens; no tokens means not rated
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        if tokens.is_empty() {
            Self::NotRated
        } else {
            Self::Rated(tokens)
        }
    }

    pub fn is_rated(&self) -> bool {
        matches!(self, Self::Rated(_))
    }
}

impl std::fmt::Display for Stars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rated(tokens) => f.write_str(&tokens.join(" ")),
            Self::NotRated => f.write_str(NOT_RATED),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum StarsRepr {
    Tokens(Vec<String>),
    Label(String),
}

impl From<StarsRepr> for Stars {
    fn from(repr: StarsRepr) -> Self {
        match repr {
            StarsRepr::Tokens(tokens) => Stars::from_tokens(tokens),
            StarsRepr::Label(label) if label == NOT_RATED => Stars::NotRated,
            StarsRepr::Label(label) => Stars::Rated(vec![label]),
        }
    }
}

impl From<Stars> for StarsRepr {
    fn from(stars: Stars) -> Self {
        match stars {
            Stars::Rated(tokens) => StarsRepr::Tokens(tokens),
            Stars::NotRated => StarsRepr::Label(NOT_RATED.to_string()),
        }
    }
}
