//! CSS selectors for product page extraction
//!
//! Update these when the storefront markup changes; each extractor degrades to
//! its fallback value when its selector stops matching.

/// Page `<title>`, used for robot-check detection
pub const PAGE_TITLE: &str = "title";

/// Text in the page title that identifies a robot-check challenge
pub const ROBOT_CHECK_MARKER: &str = "Robot Check";

pub const PRODUCT_TITLE: &str = "#productTitle";

pub const OUR_PRICE: &str = "span#priceblock_ourprice";

pub const SALE_PRICE: &str = "span#priceblock_saleprice";

pub const FEATURE_BULLETS: &str = "#feature-bullets > ul > li > span";

pub const GALLERY_THUMBNAILS: &str =
    "#altImages > ul > li > span > span > span > span > span > img";

pub const REVIEW_COUNT: &str = "#acrCustomerReviewText";

pub const SALES_RANK: &str = "#SalesRank";

pub const RATING_SUMMARY: &str = "#reviewSummary > div:nth-of-type(2) > span > a > span";

/// Thumbnail size marker in gallery image URLs
pub const THUMBNAIL_SIZE: &str = "_SS40_";

/// Replacement size marker requesting a large rendition
pub const LARGE_SIZE: &str = "_SX500_";

/// Substring identifying tracking pixel placeholders in the gallery
pub const TRACKING_PIXEL: &str = "pixel";

/// Characters that mark a price string as carrying a currency
pub const CURRENCY_MARKERS: &[char] = &['$', '€', '£', '¥', '￥'];
