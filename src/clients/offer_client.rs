use crate::model::Offer;
use crate::offer_actor::{OfferCommand, OfferError, OfferSnapshot};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the offer store actor.
///
/// Cheap to clone: it only holds the sending half of the command queue. Every call
/// waits for queue capacity first, and calls that expect an answer then wait for the
/// actor's reply.
#[derive(Clone, Debug)]
pub struct OfferClient {
    sender: mpsc::Sender<OfferCommand>,
}

impl OfferClient {
    pub fn new(sender: mpsc::Sender<OfferCommand>) -> Self {
        Self { sender }
    }

    async fn send(&self, command: OfferCommand) -> Result<(), OfferError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| OfferError::ActorClosed)
    }

    /// Fetches every offer currently held by the store.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<OfferSnapshot, OfferError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(OfferCommand::GetAll { respond_to }).await?;
        response.await.map_err(|_| OfferError::ActorDropped)?
    }

    /// Replaces the offer at `index`. Returns once the command is queued, not applied.
    #[instrument(skip(self, offer))]
    pub async fn set_at(&self, index: usize, offer: Offer) -> Result<(), OfferError> {
        debug!(payload = %offer.payload, "Sending request");
        self.send(OfferCommand::SetAt { index, offer }).await
    }

    /// Counts one view of the offer at `index` and returns it with its new count.
    #[instrument(skip(self))]
    pub async fn increment_at(&self, index: usize) -> Result<Offer, OfferError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(OfferCommand::IncrementAt { index, respond_to })
            .await?;
        response.await.map_err(|_| OfferError::ActorDropped)?
    }

    /// Asks the actor to stop after the commands already queued ahead of this one.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<(), OfferError> {
        debug!("Sending request");
        self.send(OfferCommand::Stop).await
    }
}
