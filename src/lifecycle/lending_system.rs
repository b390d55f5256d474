use std::sync::Arc;
use tracing::{error, info};

use crate::booking::BookingService;
use crate::clients::{CatalogClient, ReservationClient};
use crate::collaborators::{
    BroadcastNotifier, Clock, Collaborators, SessionDirectory, SystemClock,
};
use crate::config::BookingConfig;

/// The booking core wired to in-memory collaborators.
///
/// `LendingSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the catalog and reservation actors
/// - **Dependency Wiring**: Handing the actors' clients, the session directory, the
///   notifier and the clock to one [`BookingService`]
///
/// # Example
///
/// ```ignore
/// let system = LendingSystem::new();
///
/// system.sessions.sign_in(token.clone(), borrower).await;
/// let reservation = system.booking.request_reservation(&token, request).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct LendingSystem {
    /// Entry point for every booking operation
    pub booking: BookingService,

    /// Catalog management (listing items, switching availability)
    pub catalog_client: CatalogClient,

    /// Direct store access, e.g. for [`ReservationClient::import`]
    pub reservation_client: ReservationClient,

    /// Session table the booking service authenticates against
    pub sessions: Arc<SessionDirectory>,

    /// Subscribe here to hear about changed items
    pub notifier: Arc<BroadcastNotifier>,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl LendingSystem {
    /// Starts a system with default configuration and the wall clock.
    pub fn new() -> Self {
        Self::with_config(BookingConfig::default())
    }

    pub fn with_config(config: BookingConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Starts a system reading time from `clock`.
    ///
    /// Must be called inside a Tokio runtime; both actors are spawned immediately.
    pub fn with_clock(config: BookingConfig, clock: Arc<dyn Clock>) -> Self {
        let (catalog_actor, catalog_client) =
            crate::catalog_actor::CatalogActor::new(config.channel_buffer);
        let (reservation_actor, reservation_client) =
            crate::reservation_actor::ReservationActor::new(config.channel_buffer);

        let catalog_handle = tokio::spawn(catalog_actor.run());
        let reservation_handle = tokio::spawn(reservation_actor.run());

        let sessions = Arc::new(SessionDirectory::new());
        let notifier = Arc::new(BroadcastNotifier::new(config.notify_capacity));

        let collaborators = Collaborators {
            identity: sessions.clone(),
            catalog: Arc::new(catalog_client.clone()),
            reservations: Arc::new(reservation_client.clone()),
            notifier: notifier.clone(),
            clock,
        };

        info!(?config, "Lending system started");

        Self {
            booking: BookingService::new(collaborators, config),
            catalog_client,
            reservation_client,
            sessions,
            notifier,
            handles: vec![catalog_handle, reservation_handle],
        }
    }

    /// Gracefully shuts down the actors.
    ///
    /// Dropping the system's clients closes the actor channels once no other clone
    /// is alive; each actor then leaves its loop. Clones of the clients or of the
    /// booking service held elsewhere keep their actor running, so drop them first.
    ///
    /// # Errors
    /// An actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.booking);
        drop(self.catalog_client);
        drop(self.reservation_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for LendingSystem {
    fn default() -> Self {
        Self::new()
    }
}
