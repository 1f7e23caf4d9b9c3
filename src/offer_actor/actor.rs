//! # Offer Store Actor
//!
//! This module defines the `OfferStoreActor`, the single owner of the active and retired
//! offer collections. It processes commands one at a time in arrival order, so the
//! collections never need a lock.

use super::error::OfferError;
use super::message::{OfferCommand, OfferSnapshot};
use crate::clients::OfferClient;
use crate::model::Offer;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns every offer.
///
/// **Concurrency Model**:
/// HTTP handlers and the rotation trigger race to send commands, but only this actor's
/// task ever touches `active` and `retired`. Each command is applied completely before
/// the next one is received, which makes every command atomic to outside observers.
///
/// # Invariants
/// * `active.len()` is fixed at construction and never changes.
/// * An offer enters `retired` only when it is evicted with at least one view, and is
///   never modified or removed afterwards. Nothing prunes `retired`.
pub struct OfferStoreActor {
    receiver: mpsc::Receiver<OfferCommand>,
    active: Vec<Offer>,
    retired: Vec<Offer>,
}

impl OfferStoreActor {
    /// Creates an actor whose active set holds `offer_count` fresh random offers.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the command queue. When it is full, senders wait.
    /// * `offer_count` - Size of the active set.
    /// * `payload_len` - Length of each generated payload.
    pub fn new(buffer_size: usize, offer_count: usize, payload_len: usize) -> (Self, OfferClient) {
        let offers = (0..offer_count)
            .map(|_| Offer::random(payload_len))
            .collect();
        Self::with_offers(buffer_size, offers)
    }

    /// Creates an actor around an explicit active set.
    pub fn with_offers(buffer_size: usize, offers: Vec<Offer>) -> (Self, OfferClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            active: offers,
            retired: Vec::new(),
        };
        (actor, OfferClient::new(sender))
    }

    /// Runs the command loop until a `Stop` command arrives or every client is dropped.
    pub async fn run(mut self) {
        info!(active = self.active.len(), "Offer store started");

        while let Some(command) = self.receiver.recv().await {
            match command {
                OfferCommand::GetAll { respond_to } => {
                    let snapshot = self.snapshot();
                    debug!(items = snapshot.len(), "GetAll");
                    let _ = respond_to.send(Ok(snapshot));
                }
                OfferCommand::SetAt { index, offer } => {
                    debug!(index, payload = %offer.payload, "SetAt");
                    if let Err(e) = self.set_at(index, offer) {
                        warn!(index, error = %e, "SetAt skipped");
                    }
                }
                OfferCommand::IncrementAt { index, respond_to } => {
                    let result = self.increment_at(index);
                    match &result {
                        Ok(offer) => debug!(index, views = offer.views, "IncrementAt"),
                        Err(e) => warn!(index, error = %e, "IncrementAt skipped"),
                    }
                    let _ = respond_to.send(result);
                }
                OfferCommand::Stop => {
                    info!("Stop received");
                    break;
                }
            }
        }

        info!(
            active = self.active.len(),
            retired = self.retired.len(),
            "Offer store stopped"
        );
    }

    fn snapshot(&self) -> OfferSnapshot {
        OfferSnapshot {
            active: self.active.clone(),
            retired: self.retired.clone(),
        }
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Offer, OfferError> {
        let len = self.active.len();
        self.active
            .get_mut(index)
            .ok_or(OfferError::IndexOutOfRange { index, len })
    }

    fn set_at(&mut self, index: usize, offer: Offer) -> Result<(), OfferError> {
        let slot = self.slot_mut(index)?;
        let evicted = std::mem::replace(slot, offer);
        if evicted.is_viewed() {
            debug!(index, payload = %evicted.payload, views = evicted.views, "Retired");
            self.retired.push(evicted);
        }
        Ok(())
    }

    fn increment_at(&mut self, index: usize) -> Result<Offer, OfferError> {
        let slot = self.slot_mut(index)?;
        slot.views += 1;
        Ok(slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offers(payloads: &[&str]) -> Vec<Offer> {
        payloads.iter().map(|p| Offer::new(*p)).collect()
    }

    fn spawn(payloads: &[&str]) -> (OfferClient, tokio::task::JoinHandle<()>) {
        let (actor, client) = OfferStoreActor::with_offers(8, offers(payloads));
        (client, tokio::spawn(actor.run()))
    }

    #[tokio::test]
    async fn test_new_populates_active_set() {
        let (actor, client) = OfferStoreActor::new(4, 50, 2);
        tokio::spawn(actor.run());

        let snapshot = client.get_all().await.unwrap();
        assert_eq!(snapshot.active.len(), 50);
        assert!(snapshot.retired.is_empty());
        assert!(snapshot
            .active
            .iter()
            .all(|o| o.payload.len() == 2 && o.views == 0));
    }

    #[tokio::test]
    async fn test_increment_returns_post_increment_offer() {
        let (client, _handle) = spawn(&["aa", "bb"]);

        let first = client.increment_at(1).await.unwrap();
        assert_eq!(first, Offer { payload: "bb".into(), views: 1 });

        let second = client.increment_at(1).await.unwrap();
        assert_eq!(second.views, 2);

        let snapshot = client.get_all().await.unwrap();
        assert_eq!(snapshot.active[0].views, 0);
        assert_eq!(snapshot.active[1].views, 2);
    }

    #[tokio::test]
    async fn test_increment_then_rotate_scenario() {
        let (client, _handle) = spawn(&["aa", "bb", "cc"]);

        for _ in 0..3 {
            client.increment_at(0).await.unwrap();
        }
        let snapshot = client.get_all().await.unwrap();
        assert_eq!(snapshot.active[0].views, 3);

        client.set_at(0, Offer::new("zz")).await.unwrap();

        let snapshot = client.get_all().await.unwrap();
        assert_eq!(snapshot.retired, vec![Offer { payload: "aa".into(), views: 3 }]);
        assert_eq!(snapshot.active[0], Offer::new("zz"));
        assert_eq!(snapshot.active.len(), 3);
    }

    #[tokio::test]
    async fn test_replacing_unviewed_offer_does_not_retire_it() {
        let (client, _handle) = spawn(&["aa", "bb"]);

        client.set_at(1, Offer::new("xx")).await.unwrap();

        let snapshot = client.get_all().await.unwrap();
        assert!(snapshot.retired.is_empty());
        assert_eq!(snapshot.active, offers(&["aa", "xx"]));
    }

    #[tokio::test]
    async fn test_get_all_lists_active_then_retired() {
        let (client, _handle) = spawn(&["aa", "bb"]);

        client.increment_at(0).await.unwrap();
        client.set_at(0, Offer::new("cc")).await.unwrap();
        client.increment_at(1).await.unwrap();
        client.set_at(1, Offer::new("dd")).await.unwrap();

        let snapshot = client.get_all().await.unwrap();
        assert_eq!(snapshot.len(), 4);
        let payloads: Vec<&str> = snapshot.iter().map(|o| o.payload.as_str()).collect();
        assert_eq!(payloads, vec!["cc", "dd", "aa", "bb"]);
    }

    #[tokio::test]
    async fn test_out_of_range_index_leaves_state_untouched() {
        let (client, _handle) = spawn(&["aa"]);

        client.set_at(5, Offer::new("zz")).await.unwrap();
        let err = client.increment_at(1).await.unwrap_err();
        assert_eq!(err, OfferError::IndexOutOfRange { index: 1, len: 1 });

        let snapshot = client.get_all().await.unwrap();
        assert_eq!(snapshot.active, offers(&["aa"]));
        assert!(snapshot.retired.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let (client, _handle) = spawn(&["aa", "bb", "cc", "dd", "ee"]);

        let mut handles = vec![];
        for i in 0..200 {
            let client = client.clone();
            handles.push(tokio::spawn(async move { client.increment_at(i % 5).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let snapshot = client.get_all().await.unwrap();
        assert_eq!(snapshot.total_views(), 200);
        assert!(snapshot.active.iter().all(|o| o.views == 40));
    }

    #[tokio::test]
    async fn test_stop_terminates_loop() {
        let (client, handle) = spawn(&["aa"]);

        client.stop().await.unwrap();
        handle.await.unwrap();

        assert_eq!(client.get_all().await.unwrap_err(), OfferError::ActorClosed);
    }

    #[tokio::test]
    async fn test_dropping_all_clients_terminates_loop() {
        let (client, handle) = spawn(&["aa"]);

        drop(client);
        handle.await.unwrap();
    }
}
