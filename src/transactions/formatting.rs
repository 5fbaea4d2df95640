use num_format::{Locale, ToFormattedString};

use super::types::TxDirection;

pub const SATOSHIS_PER_BTC: u64 = 100_000_000;

/// Precision used for the headline balance.
pub const BALANCE_DECIMALS: u32 = 6;
/// Precision used for totals and individual transactions.
pub const AMOUNT_DECIMALS: u32 = 8;

/// Format satoshis as BTC with `decimals` fractional digits (e.g. "1,234.56789000 BTC").
///
/// Rounds half up when `decimals` is below satoshi precision.
pub fn format_btc(satoshis: u64, decimals: u32) -> String {
    let decimals = decimals.min(AMOUNT_DECIMALS);
    let scale = 10u64.pow(AMOUNT_DECIMALS - decimals);
    let units = satoshis.saturating_add(scale / 2) / scale;

    let unit_base = 10u64.pow(decimals);
    let whole = (units / unit_base).to_formatted_string(&Locale::en);
    if decimals == 0 {
        return format!("{} BTC", whole);
    }

    format!(
        "{}.{:0width$} BTC",
        whole,
        units % unit_base,
        width = decimals as usize
    )
}

/// Amount with a `+` or `-` prefix depending on direction.
pub fn format_signed_btc(direction: TxDirection, satoshis: u64) -> String {
    format!("{}{}", direction.sign(), format_btc(satoshis, AMOUNT_DECIMALS))
}

/// Fiat value of `satoshis` at `rate` units per BTC (e.g. "12,345.67 USD").
pub fn format_fiat(satoshis: u64, rate: f64, currency: &str) -> String {
    let amount = satoshis as f64 / SATOSHIS_PER_BTC as f64 * rate;
    let cents = if amount.is_finite() && amount > 0.0 {
        (amount * 100.0).round() as u64
    } else {
        0
    };

    format!(
        "{}.{:02} {}",
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100,
        currency
    )
}

/// Format a rate (units per BTC) with two decimals.
pub fn format_rate(rate: f64, currency: &str) -> String {
    format_fiat(SATOSHIS_PER_BTC, rate, currency)
}
