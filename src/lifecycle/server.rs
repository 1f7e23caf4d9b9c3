use super::OfferSystem;
use crate::clients::OfferClient;
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::web::{create_app, AppState};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tokio::time;
use tracing::{info, warn};

/// The HTTP service: a bound listener in front of a running [`OfferSystem`].
///
/// Binding and running are split so callers (tests in particular) can learn the
/// bound address before requests start flowing.
pub struct OfferServer {
    listener: TcpListener,
    system: OfferSystem,
    state: AppState,
    shutdown_grace: Duration,
}

impl OfferServer {
    /// Validates the configuration, binds `0.0.0.0:<port>` and starts the offer system.
    pub async fn bind(config: ServiceConfig) -> Result<Self, ServiceError> {
        config.validate()?;

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServiceError::Bind { addr, source })?;

        let system = OfferSystem::start(&config);
        let state = AppState::new(system.client.clone(), &config);

        Ok(Self {
            listener,
            system,
            state,
            shutdown_grace: config.shutdown_grace,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn client(&self) -> OfferClient {
        self.system.client.clone()
    }

    /// Serves requests until `shutdown` resolves, then shuts down in order:
    ///
    /// 1. stop the rotation trigger
    /// 2. stop accepting connections and drain in-flight requests, for at most the grace period
    /// 3. stop the offer store and wait for it to exit
    ///
    /// A drain that overruns the grace period is logged and abandoned; shutdown continues.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<(), ServiceError> {
        let Self {
            listener,
            system,
            state,
            shutdown_grace,
        } = self;

        let addr = listener.local_addr().map_err(ServiceError::Serve)?;
        let (drain, drained) = oneshot::channel::<()>();
        let app = create_app(state);
        let mut server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    // sender dropped also means shut down
                    let _ = drained.await;
                })
                .await
        });
        info!(%addr, "Server started");

        let early_exit = tokio::select! {
            _ = shutdown => None,
            result = &mut server => Some(result),
        };

        shutdown_in_order(system, server, drain, early_exit, shutdown_grace).await
    }
}

/// Stops rotation, drains HTTP within `grace`, then stops the store.
///
/// The store is always stopped and awaited, even when the serve task failed; that
/// failure is reported only afterwards.
async fn shutdown_in_order(
    mut system: OfferSystem,
    mut server: JoinHandle<io::Result<()>>,
    drain: oneshot::Sender<()>,
    early_exit: Option<Result<io::Result<()>, JoinError>>,
    grace: Duration,
) -> Result<(), ServiceError> {
    if let Err(e) = system.stop_rotation().await {
        warn!(error = %e, "Rotation task failed");
    }

    let served = match early_exit {
        Some(result) => {
            warn!("HTTP server terminated before shutdown");
            result
        }
        None => {
            info!("Shutdown initiated");
            let _ = drain.send(());
            match time::timeout(grace, &mut server).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        grace_ms = grace.as_millis() as u64,
                        "HTTP server did not drain in time"
                    );
                    server.abort();
                    Ok(Ok(()))
                }
            }
        }
    };

    system.shutdown().await?;
    info!("Shutdown completed");

    served?.map_err(ServiceError::Serve)
}

/// Resolves on Ctrl+C, or on SIGTERM on unix.
pub async fn shutdown_signal() -> Result<(), ServiceError> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ServiceError::Signal)?;
        tokio::select! {
            result = signal::ctrl_c() => {
                result.map_err(ServiceError::Signal)?;
                warn!("Received interrupt");
            }
            _ = terminate.recv() => warn!("Received SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.map_err(ServiceError::Signal)?;
        warn!("Received interrupt");
    }

    Ok(())
}
