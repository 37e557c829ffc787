//! In-flight address lookups with supersession
//!
//! Every request bumps a generation counter and aborts the previous task.
//! Results carry their generation back over a channel; anything older than
//! the latest request is dropped, so the last selection always wins even if
//! an aborted task managed to send before it was cancelled.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{AddressResolver, GeoText};
use crate::domain::SelectedRegion;

/// Completed lookup, tagged with the request that produced it
#[derive(Debug)]
pub struct LookupResult {
    pub generation: u64,
    pub region: SelectedRegion,
    pub outcome: Result<GeoText, String>,
}

/// What the shell shows next to the selected region
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LookupStatus {
    #[default]
    Idle,
    Loading,
    Resolved(GeoText),
    Failed,
}

pub struct AddressLookup {
    resolver: Arc<dyn AddressResolver>,
    tx: mpsc::Sender<LookupResult>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    status: LookupStatus,
}

impl AddressLookup {
    /// Create the driver and the receiving end the shell should poll
    pub fn new(resolver: Arc<dyn AddressResolver>) -> (Self, mpsc::Receiver<LookupResult>) {
        let (tx, rx) = mpsc::channel(16);
        (
            Self {
                resolver,
                tx,
                generation: 0,
                in_flight: None,
                status: LookupStatus::Idle,
            },
            rx,
        )
    }

    pub fn status(&self) -> &LookupStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start resolving `region`, superseding any running lookup.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&mut self, region: SelectedRegion) -> u64 {
        self.abort_in_flight();
        self.generation += 1;
        self.status = LookupStatus::Loading;

        let generation = self.generation;
        let tx = self.tx.clone();
        let fut = self.resolver.resolve(region);
        log::info!("Resolving address for {region:?} (request {generation})");

        self.in_flight = Some(tokio::spawn(async move {
            let outcome = fut.await.map_err(|e| format!("{e:#}"));
            if tx
                .send(LookupResult {
                    generation,
                    region,
                    outcome,
                })
                .await
                .is_err()
            {
                log::debug!("Lookup {generation} finished after the receiver closed");
            }
        }));
        generation
    }

    /// Drop any running lookup and forget the last result
    pub fn cancel(&mut self) {
        self.abort_in_flight();
        // Results from before the cancel must not be applied
        self.generation += 1;
        self.status = LookupStatus::Idle;
    }

    /// Apply a finished lookup; returns false when it was superseded
    pub fn accept(&mut self, result: LookupResult) -> bool {
        if result.generation != self.generation {
            log::debug!(
                "Dropping stale lookup {} (latest is {})",
                result.generation,
                self.generation
            );
            return false;
        }
        self.in_flight = None;
        self.status = match result.outcome {
            Ok(text) => LookupStatus::Resolved(text),
            Err(err) => {
                log::warn!("Address lookup failed: {err}");
                LookupStatus::Failed
            }
        };
        true
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl Drop for AddressLookup {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::future::BoxFuture;

    use super::*;
    use crate::geocode::{AreaSize, MockAddressResolver};

    fn region(north: f64) -> SelectedRegion {
        SelectedRegion {
            north,
            south: 37.555,
            east: 126.925,
            west: 126.92,
        }
    }

    struct FailingResolver;

    impl AddressResolver for FailingResolver {
        fn resolve(&self, _region: SelectedRegion) -> BoxFuture<'static, anyhow::Result<GeoText>> {
            Box::pin(async { Err(anyhow::anyhow!("service unavailable")) })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_request_wins() {
        let resolver = Arc::new(MockAddressResolver::hongdae(Duration::from_millis(500)));
        let (mut lookup, mut rx) = AddressLookup::new(resolver);

        lookup.request(region(37.5565));
        tokio::time::sleep(Duration::from_millis(200)).await;
        let latest = lookup.request(region(37.565));
        assert_eq!(lookup.status(), &LookupStatus::Loading);

        let result = rx.recv().await.unwrap();
        assert_eq!(result.generation, latest);
        assert_eq!(result.region, region(37.565));
        assert!(lookup.accept(result));
        assert!(matches!(lookup.status(), LookupStatus::Resolved(_)));

        // The superseded task was aborted and never reports
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_dropped() {
        let resolver = Arc::new(MockAddressResolver::hongdae(Duration::from_millis(10)));
        let (mut lookup, mut rx) = AddressLookup::new(resolver);

        let first = lookup.request(region(37.5565));
        let result = rx.recv().await.unwrap();
        assert_eq!(result.generation, first);

        // A newer request went out before the old result was applied
        lookup.request(region(37.565));
        assert!(!lookup.accept(result));
        assert_eq!(lookup.status(), &LookupStatus::Loading);

        let fresh = rx.recv().await.unwrap();
        assert!(lookup.accept(fresh));
        match lookup.status() {
            LookupStatus::Resolved(text) => assert_eq!(text.area, AreaSize::Narrow),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_result() {
        let resolver = Arc::new(MockAddressResolver::hongdae(Duration::ZERO));
        let (mut lookup, mut rx) = AddressLookup::new(resolver);

        lookup.request(region(37.56));
        let result = rx.recv().await.unwrap();
        lookup.cancel();
        assert!(!lookup.accept(result));
        assert_eq!(lookup.status(), &LookupStatus::Idle);
    }

    #[tokio::test]
    async fn test_failure_sets_failed_status() {
        let (mut lookup, mut rx) = AddressLookup::new(Arc::new(FailingResolver));
        lookup.request(region(37.56));
        let result = rx.recv().await.unwrap();
        assert!(result.outcome.is_err());
        assert!(lookup.accept(result));
        assert_eq!(lookup.status(), &LookupStatus::Failed);
    }
}
