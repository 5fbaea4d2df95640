use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::trace;

use super::types::{MergedTx, RawTxRef};
use crate::utils::timestamp::parse_timestamp;

/// Fold raw transaction references into one entry per transaction hash,
/// most recently confirmed first.
///
/// The first fragment seen for a hash decides its direction and
/// confirmation time; later fragments only add their value. Entries with
/// equal timestamps keep the order in which their hash first appeared.
/// The result is never truncated.
pub fn normalize(raw_refs: &[RawTxRef]) -> Vec<MergedTx> {
    normalize_at(raw_refs, Utc::now())
}

/// Same as [`normalize`], with unparseable timestamps ordered as `now`.
pub fn normalize_at(raw_refs: &[RawTxRef], now: DateTime<Utc>) -> Vec<MergedTx> {
    let mut index_by_hash: HashMap<&str, usize> = HashMap::with_capacity(raw_refs.len());
    let mut merged: Vec<MergedTx> = Vec::new();

    for fragment in raw_refs {
        match index_by_hash.get(fragment.tx_hash.as_str()) {
            Some(&idx) => merged[idx].absorb(fragment),
            None => {
                index_by_hash.insert(fragment.tx_hash.as_str(), merged.len());
                merged.push(MergedTx::seed(fragment));
            },
        }
    }

    trace!(
        fragments = raw_refs.len(),
        merged = merged.len();
        "Merged transaction fragments"
    );

    // Stable: ties keep first-seen order.
    let mut keyed: Vec<(DateTime<Utc>, MergedTx)> = merged
        .into_iter()
        .map(|tx| (parse_timestamp(&tx.confirmed).unwrap_or(now), tx))
        .collect();
    keyed.sort_by_key(|(confirmed_at, _)| Reverse(*confirmed_at));

    keyed.into_iter().map(|(_, tx)| tx).collect()
}
