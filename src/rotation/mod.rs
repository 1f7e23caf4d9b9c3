//! # Rotation Trigger
//!
//! A background task that keeps the active set fresh. On every tick it picks a slot
//! uniformly at random and sends a fire-and-forget `SetAt` with a new zero-view offer.
//! The trigger owns no data; the offer store decides whether the evicted offer is kept.

use crate::clients::OfferClient;
use crate::config::ServiceConfig;
use crate::model::Offer;
use rand::Rng;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

pub struct RotationTrigger {
    client: OfferClient,
    interval: Duration,
    offer_count: usize,
    payload_len: usize,
}

impl RotationTrigger {
    /// Returns `None` when `interval` is zero or there are no slots to rotate.
    pub fn new(
        client: OfferClient,
        interval: Duration,
        offer_count: usize,
        payload_len: usize,
    ) -> Option<Self> {
        if interval.is_zero() || offer_count == 0 {
            return None;
        }
        Some(Self {
            client,
            interval,
            offer_count,
            payload_len,
        })
    }

    /// Builds a trigger from the configuration, or `None` when rotation is disabled
    /// or the configuration leaves nothing to rotate.
    pub fn from_config(client: OfferClient, config: &ServiceConfig) -> Option<Self> {
        config
            .rotation_interval
            .and_then(|interval| Self::new(client, interval, config.offer_count, config.payload_len))
    }

    /// Starts ticking in a background task.
    ///
    /// The first rotation happens one full interval after this call.
    pub fn spawn(self) -> RotationHandle {
        let (stop, stopped) = oneshot::channel();
        let task = tokio::spawn(self.run(stopped));
        RotationHandle { stop, task }
    }

    async fn run(self, mut stopped: oneshot::Receiver<()>) {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval_ms = self.interval.as_millis() as u64, "Rotation started");

        loop {
            tokio::select! {
                biased;
                _ = &mut stopped => break,
                _ = ticker.tick() => {
                    let index = rand::thread_rng().gen_range(0..self.offer_count);
                    let offer = Offer::random(self.payload_len);
                    debug!(index, payload = %offer.payload, "Rotating offer");
                    if let Err(e) = self.client.set_at(index, offer).await {
                        warn!(error = %e, "Offer store unavailable");
                        break;
                    }
                }
            }
        }

        info!("Rotation stopped");
    }
}

/// Handle to a running [`RotationTrigger`]. Dropping it also stops the ticks.
pub struct RotationHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl RotationHandle {
    /// Cancels the timer and waits for the task to exit. No tick fires after this returns.
    pub async fn stop(self) -> Result<(), JoinError> {
        let _ = self.stop.send(());
        self.task.await
    }
}
