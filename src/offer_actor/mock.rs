//! # Test Doubles
//!
//! Helpers for testing code that sits *around* the offer store (HTTP handlers, the rotation
//! trigger) without spawning a real [`OfferStoreActor`](super::OfferStoreActor).
//!
//! [`create_mock_client`] returns a client wired to a channel the test controls. The test
//! reads the commands as they arrive and answers them with whatever it wants to simulate:
//!
//! ```rust
//! use offer_rotator::model::Offer;
//! use offer_rotator::offer_actor::mock::{create_mock_client, expect_increment_at};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver) = create_mock_client(4);
//!
//!     let task = tokio::spawn(async move { client.increment_at(3).await });
//!
//!     let (index, respond_to) = expect_increment_at(&mut receiver).await.unwrap();
//!     assert_eq!(index, 3);
//!     respond_to.send(Ok(Offer { payload: "ab".into(), views: 7 })).unwrap();
//!
//!     assert_eq!(task.await.unwrap().unwrap().views, 7);
//! }
//! ```

use super::message::{OfferCommand, OfferSnapshot, Response};
use crate::clients::OfferClient;
use crate::model::Offer;
use tokio::sync::mpsc;

/// Creates a client and the receiver its commands land on.
pub fn create_mock_client(buffer_size: usize) -> (OfferClient, mpsc::Receiver<OfferCommand>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (OfferClient::new(sender), receiver)
}

/// Helper to verify that the next command is a GetAll request
pub async fn expect_get_all(
    receiver: &mut mpsc::Receiver<OfferCommand>,
) -> Option<Response<OfferSnapshot>> {
    match receiver.recv().await {
        Some(OfferCommand::GetAll { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next command is an IncrementAt request
pub async fn expect_increment_at(
    receiver: &mut mpsc::Receiver<OfferCommand>,
) -> Option<(usize, Response<Offer>)> {
    match receiver.recv().await {
        Some(OfferCommand::IncrementAt { index, respond_to }) => Some((index, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next command is a SetAt request
pub async fn expect_set_at(receiver: &mut mpsc::Receiver<OfferCommand>) -> Option<(usize, Offer)> {
    match receiver.recv().await {
        Some(OfferCommand::SetAt { index, offer }) => Some((index, offer)),
        _ => None,
    }
}
