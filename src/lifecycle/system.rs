use tracing::{error, info};

use crate::api::LittleLemonApi;
use crate::clients::{CatalogClient, CommerceClient, IdentityClient};

/// The runtime orchestrator for the ordering service.
///
/// `LemonSystem` spawns the three actors, wires their clients into the
/// [`LittleLemonApi`] facade, and owns the task handles for shutdown.
///
/// # Architecture
///
/// - **Catalog actor**: the menu item store.
/// - **Identity actor**: accounts, group membership, staff status.
/// - **Commerce actor**: per-user carts and the order workflow; single
///   mailbox so checkout is transactional.
///
/// # Example
///
/// ```ignore
/// let system = LemonSystem::new();
///
/// let me = system.api.me(user_id).await?;
/// let line = system.api.add_to_cart(user_id, "Bruschetta", 2).await?;
/// let order = system.api.place_order(user_id).await?;
///
/// system.shutdown().await?;
/// ```
pub struct LemonSystem {
    /// The endpoint facade.
    pub api: LittleLemonApi,

    /// Direct catalog handle, for seeding and tests.
    pub catalog_client: CatalogClient,

    /// Direct identity handle, for account provisioning outside the API
    /// (registration is the identity provider's job, not this crate's).
    pub identity_client: IdentityClient,

    /// Direct commerce handle, for tests.
    pub commerce_client: CommerceClient,

    /// Task handles for all running actors, used for graceful shutdown.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl LemonSystem {
    /// Spawns all actors and wires the API facade.
    pub fn new() -> Self {
        let (catalog_actor, catalog_client) = crate::catalog_actor::new();
        let (identity_actor, identity_client) = crate::identity_actor::new();
        let (commerce_actor, commerce_client) = crate::commerce_actor::new();

        let handles = vec![
            tokio::spawn(catalog_actor.run()),
            tokio::spawn(identity_actor.run()),
            tokio::spawn(commerce_actor.run()),
        ];

        let api = LittleLemonApi::new(
            catalog_client.clone(),
            identity_client.clone(),
            commerce_client.clone(),
        );

        Self {
            api,
            catalog_client,
            identity_client,
            commerce_client,
            handles,
        }
    }

    /// Gracefully shuts the system down.
    ///
    /// Dropping the clients closes their channels; each actor drains its
    /// mailbox and exits its loop. Returns an error if any actor task
    /// panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.api);
        drop(self.catalog_client);
        drop(self.identity_client);
        drop(self.commerce_client);

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

impl Default for LemonSystem {
    fn default() -> Self {
        Self::new()
    }
}
