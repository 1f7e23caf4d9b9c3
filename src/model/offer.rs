use rand::Rng;
use serde::Serialize;

/// A short piece of text served to clients, together with how often it was served.
///
/// # Identity
/// An offer has no id of its own. It is addressed by the slot it occupies in the
/// actor's active set, and the slot keeps its index when the occupant is replaced.
///
/// Offers are only ever mutated by the [`OfferStoreActor`](crate::offer_actor::OfferStoreActor);
/// everything outside the actor works on clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offer {
    pub payload: String,
    pub views: u64,
}

impl Offer {
    /// Creates an offer that has never been viewed.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            views: 0,
        }
    }

    /// Creates a fresh offer with a random payload of `payload_len` characters.
    pub fn random(payload_len: usize) -> Self {
        Self::new(random_payload(payload_len))
    }

    pub fn is_viewed(&self) -> bool {
        self.views > 0
    }
}

/// Generates `len` random lowercase characters in the range `a..y`.
pub fn random_payload(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(b'a'..b'z') as char).collect()
}
