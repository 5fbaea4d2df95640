use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::error::LookupError;
use super::source::{AddressSource, RateSource};
use super::WalletTracker;
use crate::log::mask_string;
use crate::report::AddressReport;

/// Outcome of one lookup in a tracking session.
#[derive(Debug)]
pub enum SessionEvent {
    Report(AddressReport),
    Failed { address: String, error: LookupError },
}

struct InFlight {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs one lookup at a time; submitting a new address supersedes the
/// previous one, whose result is then dropped before normalization.
///
/// The rate is fetched once and reused for every lookup of the session.
pub struct TrackSession<A, R> {
    tracker: Arc<WalletTracker<A, R>>,
    rate: Arc<RwLock<Option<f64>>>,
    events: mpsc::Sender<SessionEvent>,
    in_flight: Option<InFlight>,
}

impl<A, R> TrackSession<A, R>
where
    A: AddressSource + 'static,
    R: RateSource + 'static,
{
    pub fn new(tracker: Arc<WalletTracker<A, R>>, events: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            tracker,
            rate: Arc::new(RwLock::new(None)),
            events,
            in_flight: None,
        }
    }

    /// Fetch and cache the rate ahead of the first lookup.
    pub async fn prefetch_rate(&self) -> Result<f64, LookupError> {
        cached_rate(&self.tracker, &self.rate).await
    }

    /// Start a lookup for `address`, cancelling the one still running.
    pub fn submit(&mut self, address: String) {
        self.cancel_in_flight();

        let token = CancellationToken::new();
        let task_token = token.clone();
        let tracker = Arc::clone(&self.tracker);
        let rate = Arc::clone(&self.rate);
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = task_token.cancelled() => {
                    debug!(address:% = mask_string(&address); "Lookup superseded");
                    return;
                }
                result = lookup(&tracker, &rate, &address) => result,
            };

            if task_token.is_cancelled() {
                debug!(address:% = mask_string(&address); "Dropping superseded lookup result");
                return;
            }

            let event = match result {
                Ok(report) => SessionEvent::Report(report),
                Err(error) => SessionEvent::Failed { address, error },
            };
            if events.send(event).await.is_err() {
                warn!("Session event receiver closed");
            }
        });

        self.in_flight = Some(InFlight { token, handle });
    }

    pub fn cancel_in_flight(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.token.cancel();
        }
    }

    /// Wait for the current lookup, if any, to deliver its event.
    pub async fn finish(mut self) {
        if let Some(in_flight) = self.in_flight.take()
            && let Err(e) = in_flight.handle.await
        {
            warn!(error:% = e; "Lookup task failed");
        }
    }
}

async fn cached_rate<A: AddressSource, R: RateSource>(
    tracker: &WalletTracker<A, R>,
    rate: &RwLock<Option<f64>>,
) -> Result<f64, LookupError> {
    if let Some(known) = *rate.read().await {
        return Ok(known);
    }

    let fetched = tracker.fetch_rate().await?;
    *rate.write().await = Some(fetched);
    Ok(fetched)
}

async fn lookup<A: AddressSource, R: RateSource>(
    tracker: &WalletTracker<A, R>,
    rate: &RwLock<Option<f64>>,
    address: &str,
) -> Result<AddressReport, LookupError> {
    let (info, rate) = tokio::try_join!(tracker.fetch_address(address), cached_rate(tracker, rate))?;
    Ok(tracker.build_report(&info, rate))
}
