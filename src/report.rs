use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::http::AddressInfo;
use crate::transactions::formatting::{AMOUNT_DECIMALS, BALANCE_DECIMALS, format_btc, format_fiat, format_rate};
use crate::transactions::{MergedTx, TransactionPage, display_transactions};
use crate::utils::timestamp::display_timestamp;

pub const NO_TRANSACTIONS_TEXT: &str = "No transactions have been made in this wallet before.";
pub const NO_INFORMATION_TEXT: &str = "No information";

/// Everything shown for one address lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressReport {
    pub address: String,
    pub currency: String,
    /// Fiat units per 1 BTC at the time of the lookup.
    pub rate: f64,
    pub balance: u64,
    pub balance_display: String,
    pub balance_fiat: String,
    pub total_received: u64,
    pub total_received_display: String,
    pub total_sent: u64,
    pub total_sent_display: String,
    pub n_tx: u64,
    pub last_transaction: Option<String>,
    pub transactions: TransactionPage,
}

impl AddressReport {
    /// Build a report from the address record and its normalized history.
    pub fn new(info: &AddressInfo, merged: &[MergedTx], rate: f64, currency: &str, limit: usize) -> Self {
        let btc_and_fiat =
            |sats: u64| format!("{} - {}", format_btc(sats, AMOUNT_DECIMALS), format_fiat(sats, rate, currency));

        Self {
            address: info.address.clone(),
            currency: currency.to_string(),
            rate,
            balance: info.balance,
            balance_display: format_btc(info.balance, BALANCE_DECIMALS),
            balance_fiat: format_fiat(info.balance, rate, currency),
            total_received: info.total_received,
            total_received_display: btc_and_fiat(info.total_received),
            total_sent: info.total_sent,
            total_sent_display: btc_and_fiat(info.total_sent),
            n_tx: info.n_tx,
            last_transaction: merged.first().map(|tx| display_timestamp(&tx.confirmed)),
            transactions: display_transactions(merged, rate, currency, limit),
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "Address        {}", self.address)?;
        writeln!(out, "Balance        {}", self.balance_display)?;
        writeln!(out, "Total Balance  {}", self.balance_fiat)?;
        writeln!(out)?;

        writeln!(out, "Address Information")?;
        writeln!(out, "  Total Received          {}", self.total_received_display)?;
        writeln!(out, "  Total Sent              {}", self.total_sent_display)?;
        writeln!(out, "  Number of Transactions  {}", self.n_tx)?;
        writeln!(
            out,
            "  Last Transaction        {}",
            self.last_transaction.as_deref().unwrap_or(NO_INFORMATION_TEXT)
        )?;
        writeln!(out)?;

        writeln!(out, "Transactions")?;
        let page = &self.transactions;
        if page.transactions.is_empty() {
            writeln!(out, "  {}", NO_TRANSACTIONS_TEXT)?;
            return Ok(());
        }

        for tx in &page.transactions {
            writeln!(
                out,
                "  {:>22}  {:>16}  {:<8}  {}",
                tx.amount_display,
                tx.fiat_display,
                tx.direction.as_label(),
                tx.date_display
            )?;
            writeln!(out, "    {}", tx.tx_hash)?;
        }

        if page.is_truncated() {
            writeln!(out)?;
            writeln!(
                out,
                "Warning! Only the last {} transactions are shown ({} in total).",
                page.limit, page.total
            )?;
        }
        Ok(())
    }
}

/// One-line rendering of a price lookup.
pub fn render_rate(rate: f64, currency: &str, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(format!("1 BTC = {}", format_rate(rate, currency))),
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "currency": currency,
            "rate": rate,
        })),
    }
}
