//! Builds the handler state from the configured store.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use recipe_box::inbound::http::state::HttpState;
use recipe_box::outbound::memory::MemoryStore;
use recipe_box::outbound::persistence::{
    DbPool, DieselFavoriteRepository, DieselRecipeRepository, DieselUserRepository,
};
use tracing::{info, warn};

/// Diesel repositories over `pool`, or a fresh in-memory store.
pub(crate) fn build_http_state(pool: Option<&DbPool>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match pool {
        Some(pool) => {
            info!("using PostgreSQL store");
            HttpState::from_repositories(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselRecipeRepository::new(pool.clone())),
                Arc::new(DieselFavoriteRepository::new(pool.clone())),
                clock,
            )
        }
        None => {
            warn!("no database configured; data lives in memory and is lost on restart");
            HttpState::from_store(Arc::new(MemoryStore::new()), clock)
        }
    }
}
