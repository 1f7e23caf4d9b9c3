use crate::clients::OfferClient;
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::offer_actor;
use crate::rotation::{RotationHandle, RotationTrigger};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Owns the running offer store and its rotation trigger.
///
/// `OfferSystem` is responsible for:
/// - **Startup**: spawning the store actor and, when configured, the rotation trigger
/// - **Access**: handing out [`OfferClient`]s to whoever needs to talk to the store
/// - **Shutdown**: stopping rotation first, then the store, and waiting for both tasks
///
/// # Example
///
/// ```rust
/// use offer_rotator::config::ServiceConfig;
/// use offer_rotator::lifecycle::OfferSystem;
///
/// #[tokio::main]
/// async fn main() {
///     let system = OfferSystem::start(&ServiceConfig::default());
///     let offer = system.client.increment_at(0).await.unwrap();
///     assert_eq!(offer.views, 1);
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct OfferSystem {
    /// Client for interacting with the offer store
    pub client: OfferClient,

    rotation: Option<RotationHandle>,
    store: JoinHandle<()>,
}

impl OfferSystem {
    pub fn start(config: &ServiceConfig) -> Self {
        let (actor, client) = offer_actor::new(config);
        let store = tokio::spawn(actor.run());

        let rotation =
            RotationTrigger::from_config(client.clone(), config).map(RotationTrigger::spawn);
        if rotation.is_none() {
            info!("Rotation disabled");
        }

        Self {
            client,
            rotation,
            store,
        }
    }

    /// Stops the rotation trigger. Does nothing if it is disabled or already stopped.
    pub async fn stop_rotation(&mut self) -> Result<(), ServiceError> {
        if let Some(rotation) = self.rotation.take() {
            rotation.stop().await?;
        }
        Ok(())
    }

    /// Stops rotation, sends `Stop` to the store and waits for its task to end.
    pub async fn shutdown(mut self) -> Result<(), ServiceError> {
        self.stop_rotation().await?;

        if let Err(e) = self.client.stop().await {
            warn!(error = %e, "Offer store already stopped");
        }
        self.store.await?;

        info!("Offer system stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer_actor::OfferError;
    use std::time::Duration;

    #[tokio::test]
    async fn test_start_and_shutdown_without_rotation() {
        let config = ServiceConfig {
            offer_count: 3,
            rotation_interval: None,
            ..ServiceConfig::default()
        };
        let system = OfferSystem::start(&config);
        let client = system.client.clone();

        assert_eq!(client.get_all().await.unwrap().active.len(), 3);

        system.shutdown().await.unwrap();
        assert_eq!(client.get_all().await.unwrap_err(), OfferError::ActorClosed);
    }

    #[tokio::test]
    async fn test_shutdown_with_rotation_running() {
        let config = ServiceConfig {
            offer_count: 5,
            rotation_interval: Some(Duration::from_millis(5)),
            ..ServiceConfig::default()
        };
        let system = OfferSystem::start(&config);
        tokio::time::sleep(Duration::from_millis(30)).await;

        let snapshot = system.client.get_all().await.unwrap();
        assert_eq!(snapshot.active.len(), 5);

        system.shutdown().await.unwrap();
    }
}
