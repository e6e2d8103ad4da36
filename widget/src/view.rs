//! Text rendering of the converter panel.

use std::fmt::Write;

use ratewatch_common::{display_local, to_fixed, Currency};

use crate::state::ConversionState;

const TITLE: &str = "Currency Converter";
const RATE_PLACES: u32 = 4;

/// Label of the manual refresh control.
pub fn refresh_label(state: &ConversionState) -> &'static str {
    if state.is_fetching() {
        "Updating..."
    } else {
        "Update Rate"
    }
}

/// `1 USD = 83.1200 INR`, or `None` before the first rate arrives.
pub fn rate_line(state: &ConversionState) -> Option<String> {
    state.rate().map(|rate| {
        format!(
            "1 {} = {} {}",
            Currency::Usd,
            to_fixed(rate, RATE_PLACES),
            Currency::Inr
        )
    })
}

/// `Last updated: <local time>`, or `Never`.
pub fn last_updated_line(state: &ConversionState) -> String {
    let when = state
        .last_updated()
        .map(display_local)
        .unwrap_or_else(|| "Never".to_string());
    format!("Last updated: {}", when)
}

/// Render the whole panel.
pub fn render(state: &ConversionState) -> String {
    let mut out = String::new();
    let from = state.from_currency();
    let to = state.to_currency();

    let _ = writeln!(out, "{}", TITLE);
    if let Some(error) = state.error() {
        let _ = writeln!(out, "! {}", error);
    }

    let _ = writeln!(out, "Amount:           {} {} ({})", from.symbol(), state.amount(), from);

    let converted = state
        .converted_amount()
        .map(|value| to_fixed(value, to.decimal_places()))
        .unwrap_or_default();
    let _ = writeln!(out, "Converted Amount: {} {} ({})", to.symbol(), converted, to);

    if let Some(line) = rate_line(state) {
        let _ = writeln!(out, "{}", line);
    }
    let _ = writeln!(out, "{}", last_updated_line(state));
    let _ = write!(out, "[{}]", refresh_label(state));

    out
}
