//! Target resolution for asin-probe
//!
//! This module turns free-form input (a bare ASIN or any product URL) and a
//! market selector into the canonical page that will be fetched and cached.

mod asin;
mod market;

pub use asin::{extract_asin, is_product_url};
pub use market::Market;

use crate::{TargetError, TargetResult};

/// Canonical product page URL template: domain, then ASIN
const BASE_URL_PREFIX: &str = "https://www.";

/// A resolved product page
///
/// Built once per probe and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTarget {
    /// The ten character product identifier
    pub asin: String,

    /// The requested marketplace
    pub market: Market,

    /// The page to fetch, also the source of the cache fingerprint
    pub url: String,
}

impl CanonicalTarget {
    /// Returns the storefront domain of the requested market
    pub fn domain(&self) -> &'static str {
        self.market.domain()
    }
}

/// Builds the canonical product URL for an ASIN on a market
///
/// # Examples
///
/// ```
/// use asin_probe::target::{canonical_url, Market};
///
/// assert_eq!(
///     canonical_url(Market::Global, "B00ZLJ1QGC"),
///     "https://www.amazon.com/product/dp/B00ZLJ1QGC"
/// );
/// ```
pub fn canonical_url(market: Market, asin: &str) -> String {
    format!("{}{}/product/dp/{}", BASE_URL_PREFIX, market.domain(), asin)
}

/// Resolves raw input against a market
///
/// The input is kept verbatim as the URL when it already is a product page on
/// any known storefront, even one belonging to a different market. Otherwise a
/// canonical URL is synthesized from the market's domain and the ASIN.
///
/// # Returns
///
/// * `Ok(CanonicalTarget)` - The resolved target
/// * `Err(TargetError::NoAsin)` - No ASIN-shaped run in the input
pub fn resolve_target(input: &str, market: Market) -> TargetResult<CanonicalTarget> {
    let asin = extract_asin(input).ok_or(TargetError::NoAsin)?.to_string();

    let url = if is_product_url(input) {
        input.to_string()
    } else {
        canonical_url(market, &asin)
    };

    Ok(CanonicalTarget { asin, market, url })
}

/// Resolves raw input against a market given by name
///
/// The ASIN is checked before the market, so input without an ASIN reports
/// `NoAsin` whatever the selector says.
pub fn resolve(input: &str, market: &str) -> TargetResult<CanonicalTarget> {
    extract_asin(input).ok_or(TargetError::NoAsin)?;
    let market = market.parse::<Market>()?;
    resolve_target(input, market)
}
