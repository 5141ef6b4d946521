//! Field extractors
//!
//! Each extractor is an independent query against the parsed document and
//! returns its documented fallback when the markup it looks for is missing.

use crate::cache::Stars;
use crate::extract::selectors;
use scraper::{ElementRef, Html, Selector};

/// Returns the first element matching a CSS selector
fn first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Returns every element matching a CSS selector, in document order
fn all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Collapses runs of whitespace into single spaces and trims the ends
fn squeeze_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns true if the page title marks a robot-check challenge
pub fn is_robot_check(document: &Html) -> bool {
    first(document, selectors::PAGE_TITLE)
        .map(|title| text_of(title).contains(selectors::ROBOT_CHECK_MARKER))
        .unwrap_or(false)
}

/// Product title, trimmed
pub fn title(document: &Html) -> Option<String> {
    first(document, selectors::PRODUCT_TITLE)
        .map(|element| text_of(element).trim().to_string())
        .filter(|s| !s.is_empty())
}

/// "Our price" split on `-` into one or two prices
pub fn list_price(document: &Html) -> Vec<String> {
    first(document, selectors::OUR_PRICE)
        .map(|element| split_price_range(&text_of(element)))
        .unwrap_or_default()
}

fn split_price_range(text: &str) -> Vec<String> {
    text.trim()
        .split('-')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Sale price, then our price, then the first list price
pub fn current_price(document: &Html) -> Option<String> {
    let chosen = first(document, selectors::SALE_PRICE)
        .or_else(|| first(document, selectors::OUR_PRICE))
        .map(|element| text_of(element).trim().to_string());

    match chosen {
        Some(price) if has_currency(&price) => Some(price),
        _ => list_price(document).into_iter().next(),
    }
}

fn has_currency(text: &str) -> bool {
    text.contains(selectors::CURRENCY_MARKERS)
}

/// Feature bullet texts, trimmed, in document order
pub fn features(document: &Html) -> Vec<String> {
    all(document, selectors::FEATURE_BULLETS)
        .into_iter()
        .map(|element| text_of(element).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Gallery thumbnails rewritten to their large rendition, tracking pixels dropped
pub fn images(document: &Html) -> Vec<String> {
    all(document, selectors::GALLERY_THUMBNAILS)
        .into_iter()
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| !src.contains(selectors::TRACKING_PIXEL))
        .map(|src| src.replace(selectors::THUMBNAIL_SIZE, selectors::LARGE_SIZE))
        .collect()
}

/// Customer review count; 0 when absent or not numeric
pub fn reviews(document: &Html) -> u64 {
    let text = all(document, selectors::REVIEW_COUNT)
        .into_iter()
        .map(text_of)
        .collect::<String>();

    text.split_whitespace()
        .next()
        .map(parse_count)
        .unwrap_or(0)
}

/// Parses the leading number of a token, ignoring thousands separators
fn parse_count(token: &str) -> u64 {
    let digits: String = token
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(0)
}

/// Best sellers rank line
///
/// Built from the second direct text node of the rank element and of each of
/// its descendants; everything but alphanumerics, `,` and `#` becomes a space.
pub fn best_seller_rank(document: &Html) -> Option<String> {
    let root = first(document, selectors::SALES_RANK)?;

    let mut raw = String::new();
    for node in root.descendants().filter(|node| node.value().is_element()) {
        if let Some(text) = node
            .children()
            .filter_map(|child| child.value().as_text())
            .nth(1)
        {
            raw.push_str(text);
        }
    }

    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ',' || c == '#' {
                c
            } else {
                ' '
            }
        })
        .collect();

    Some(squeeze_whitespace(&cleaned)).filter(|s| !s.is_empty())
}

/// Rating summary tokens with letters stripped
pub fn stars(document: &Html) -> Stars {
    let text = all(document, selectors::RATING_SUMMARY)
        .into_iter()
        .map(text_of)
        .collect::<String>();

    let stripped: String = text.chars().filter(|c| !c.is_ascii_alphabetic()).collect();
    let tokens = stripped
        .split_whitespace()
        .map(|token| token.to_string())
        .collect();

    Stars::from_tokens(tokens)
}
