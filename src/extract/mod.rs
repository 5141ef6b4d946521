//! Product page extraction
//!
//! This module turns a fetched product page into a [`ProductRecord`]:
//! - Detecting robot-check challenge pages
//! - Running every field extractor independently over the parsed document
//! - Assembling the record with its extraction timestamp

pub mod fields;
pub mod selectors;

pub use fields::is_robot_check;

use crate::cache::ProductRecord;
use chrono::{DateTime, Utc};
use scraper::Html;

/// What a fetched page turned out to be
#[derive(Debug, Clone, PartialEq)]
pub enum PageKind {
    /// The site answered with a robot-check challenge
    RobotCheck,

    /// A product page, already extracted
    Product(ProductRecord),
}

/// Parses a fetched page and either flags it as a robot check or extracts it
///
/// # Arguments
///
/// * `html` - The raw page body
/// * `url` - The URL the page was fetched from
/// * `parsed_at` - Timestamp recorded on the product record
pub fn inspect_page(html: &str, url: &str, parsed_at: DateTime<Utc>) -> PageKind {
    let document = Html::parse_document(html);

    if is_robot_check(&document) {
        PageKind::RobotCheck
    } else {
        PageKind::Product(extract_product(&document, url, parsed_at))
    }
}

/// Runs every field extractor over a document
///
/// A field whose markup is missing takes its fallback value; the other fields
/// are unaffected.
///
/// # Example
///
/// ```
/// use asin_probe::extract::extract_product;
/// use asin_probe::Stars;
/// use scraper::Html;
///
/// let html = r#"<html><body><span id="productTitle"> Bat </span></body></html>"#;
/// let document = Html::parse_document(html);
/// let record = extract_product(&document, "https://www.amazon.com/dp/B00ZLJ1QGC", chrono::Utc::now());
/// assert_eq!(record.title.as_deref(), Some("Bat"));
/// assert_eq!(record.stars, Stars::NotRated);
/// ```
pub fn extract_product(document: &Html, url: &str, parsed_at: DateTime<Utc>) -> ProductRecord {
    let title = fields::title(document);
    if title.is_none() {
        tracing::debug!("No product title found on {}", url);
    }

    ProductRecord {
        url: url.to_string(),
        title,
        list_price: fields::list_price(document),
        current_price: fields::current_price(document),
        stars: fields::stars(document),
        features: fields::features(document),
        images: fields::images(document),
        reviews: fields::reviews(document),
        best_seller_rank: fields::best_seller_rank(document),
        inventory: None,
        parsed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Stars;

    const PRODUCT_PAGE: &str = r#"
<html>
<head><title>Amazon.com: EASTON BB16S400 S400 BBCOR Adult Baseball Bat</title></head>
<body>
  <span id="productTitle">
    EASTON BB16S400 S400 BBCOR Adult Baseball Bat
  </span>
  <span id="priceblock_ourprice">$49.95</span>
  <div id="feature-bullets"><ul>
    <li><span>Two-piece design</span></li>
    <li><span>ATAC alloy barrel</span></li>
  </ul></div>
  <div id="altImages"><ul>
    <li><span><span><span><span><span><img src="https://images/I/41a._SS40_.jpg"></span></span></span></span></span></li>
  </ul></div>
  <span id="acrCustomerReviewText">12 customer reviews</span>
</body>
</html>
"#;

    #[test]
    fn test_extract_product_without_rating() {
        let parsed_at = Utc::now();
        let kind = inspect_page(PRODUCT_PAGE, "https://www.amazon.com/product/dp/B00ZLJ1QGC", parsed_at);

        let record = match kind {
            PageKind::Product(record) => record,
            PageKind::RobotCheck => panic!("product page flagged as robot check"),
        };

        assert_eq!(record.stars, Stars::NotRated);
        assert_eq!(
            record.title.as_deref(),
            Some("EASTON BB16S400 S400 BBCOR Adult Baseball Bat")
        );
        assert_eq!(record.list_price, vec!["$49.95"]);
        assert_eq!(record.current_price.as_deref(), Some("$49.95"));
        assert_eq!(record.features.len(), 2);
        assert_eq!(record.images, vec!["https://images/I/41a._SX500_.jpg"]);
        assert_eq!(record.reviews, 12);
        assert_eq!(record.best_seller_rank, None);
        assert_eq!(record.inventory, None);
        assert_eq!(record.parsed_at, parsed_at);
        assert_eq!(record.url, "https://www.amazon.com/product/dp/B00ZLJ1QGC");
    }

    #[test]
    fn test_missing_title_does_not_block_other_fields() {
        let html = r#"<html><body><span id="priceblock_ourprice">$5.00</span></body></html>"#;
        let record = extract_product(&Html::parse_document(html), "u", Utc::now());
        assert_eq!(record.title, None);
        assert_eq!(record.current_price.as_deref(), Some("$5.00"));
    }

    #[test]
    fn test_robot_check_page() {
        let html = r#"<html><head><title>Robot Check</title></head><body><form action="/errors/validateCaptcha"></form></body></html>"#;
        assert_eq!(inspect_page(html, "u", Utc::now()), PageKind::RobotCheck);
    }

    #[test]
    fn test_empty_document() {
        let record = extract_product(&Html::parse_document(""), "u", Utc::now());
        assert_eq!(record.title, None);
        assert!(record.list_price.is_empty());
        assert_eq!(record.current_price, None);
        assert!(record.features.is_empty());
        assert!(record.images.is_empty());
        assert_eq!(record.reviews, 0);
        assert_eq!(record.stars, Stars::NotRated);
    }
}
