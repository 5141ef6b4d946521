//! Plain-text rendering of probe results

use crate::cache::ProductRecord;
use crate::probe::ProbeOutcome;
use std::fmt::Write;

const RULE_WIDTH: usize = 100;

/// Renders the product summary block
///
/// Shows title, price, rating, review count, the first image and the URL.
pub fn render_summary(record: &ProductRecord) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "title: \t\t{}", record.title.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "price: \t\t{}", format_prices(record));
    let _ = writeln!(out, "stars: \t\t{}", record.stars);
    let _ = writeln!(out, "reviews: \t{}", record.reviews);
    let _ = writeln!(
        out,
        "image url: \t{}",
        record.images.first().map(String::as_str).unwrap_or("-")
    );
    let _ = writeln!(out, "product url: \t{}", record.url);

    out
}

fn format_prices(record: &ProductRecord) -> String {
    match (&record.current_price, record.list_price.as_slice()) {
        (_, []) => record.current_price.clone().unwrap_or_else(|| "-".to_string()),
        (Some(current), [list]) if current != list => format!("{} (list {})", current, list),
        (_, prices) => prices.join(" - "),
    }
}

/// Renders any probe outcome as console text
pub fn render_outcome(outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Product(record) => render_summary(record),
        ProbeOutcome::MustWait { seconds } => format!(
            "Detected as robot! Please wait {} seconds to try again.\n",
            seconds
        ),
        ProbeOutcome::CooldownExpired => {
            "Robot-check cooldown expired, try again now.\n".to_string()
        }
    }
}

/// Renders any probe outcome as pretty-printed JSON
pub fn render_json(outcome: &ProbeOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}
