use crate::target::Market;
use regex::Regex;
use std::sync::LazyLock;

/// Ten consecutive uppercase alphanumerics anywhere in the input
static ASIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Z]{10}").expect("ASIN pattern is valid"));

/// Product page URL on any known storefront:
/// `http(s)://[www.]<domain>/{gp/product | <slug>/dp | dp}/<asin>`
static PRODUCT_URL: LazyLock<Regex> = LazyLock::new(|| {
    let domains = Market::ALL
        .iter()
        .map(|m| regex::escape(m.domain()))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r"^https?://(?:www\.)?(?:{})/(?:gp/product|[^/]+/dp|dp)/[0-9A-Z]{{10}}",
        domains
    );
    Regex::new(&pattern).expect("product URL pattern is valid")
});

/// Extracts the first ASIN-shaped run from the input
///
/// # Examples
///
/// ```
/// use asin_probe::target::extract_asin;
///
/// assert_eq!(extract_asin("B00ZLJ1QGC"), Some("B00ZLJ1QGC"));
/// assert_eq!(
///     extract_asin("https://www.amazon.com/dp/B071JRLCXT/ref=sr_1_2"),
///     Some("B071JRLCXT")
/// );
/// assert_eq!(extract_asin("not-a-valid-code"), None);
/// ```
pub fn extract_asin(input: &str) -> Option<&str> {
    ASIN.find(input).map(|m| m.as_str())
}

/// Checks whether the input already is a product page URL on a known storefront
///
/// The storefront does not have to match the requested market.
pub fn is_product_url(input: &str) -> bool {
    PRODUCT_URL.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_asin() {
        assert_eq!(extract_asin("B071JRLCXT"), Some("B071JRLCXT"));
    }

    #[test]
    fn test_asin_embedded_in_text() {
        assert_eq!(extract_asin("look at B00ZLJ1QGC please"), Some("B00ZLJ1QGC"));
        assert_eq!(extract_asin("x-B00ZLJ1QGC-y"), Some("B00ZLJ1QGC"));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(extract_asin("B00ZLJ1QGC B071JRLCXT"), Some("B00ZLJ1QGC"));
    }

    #[test]
    fn test_asin_from_slug_url() {
        let url = "https://www.amazon.com/EASTON-BB16S400-BBCOR-ADULT-BASEBALL/dp/B00ZLJ1QGC/ref=sr_1_5?ie=UTF8&qid=1501170697";
        assert_eq!(extract_asin(url), Some("B00ZLJ1QGC"));
    }

    #[test]
    fn test_lowercase_and_short_runs_rejected() {
        assert_eq!(extract_asin("b00zlj1qgc"), None);
        assert_eq!(extract_asin("B00ZLJ1QG"), None);
        assert_eq!(extract_asin(""), None);
    }

    #[test]
    fn test_product_url_shapes() {
        assert!(is_product_url("https://www.amazon.com/dp/B00ZLJ1QGC"));
        assert!(is_product_url("https://amazon.com/gp/product/B00ZLJ1QGC"));
        assert!(is_product_url("http://www.amazon.com.mx/Some-Slug/dp/B00ZLJ1QGC/ref=x"));
        assert!(is_product_url("https://www.amazon.jp/dp/B00ZLJ1QGC"));
    }

    #[test]
    fn test_non_product_urls() {
        assert!(!is_product_url("B00ZLJ1QGC"));
        assert!(!is_product_url("https://www.amazon.com/product/dp/"));
        assert!(!is_product_url("https://www.amazon.de/dp/B00ZLJ1QGC"));
        assert!(!is_product_url("https://www.example.com/dp/B00ZLJ1QGC"));
        assert!(!is_product_url("https://www.amazon.com/s?k=B00ZLJ1QGC"));
        assert!(!is_product_url("see https://www.amazon.com/dp/B00ZLJ1QGC"));
    }
}
