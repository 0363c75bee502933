//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use recipe_box::inbound::http::session_config::SessionSettings;
use recipe_box::outbound::persistence::DbPool;

/// Everything `create_server` needs, assembled by `main`.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration backed by the in-memory store.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            session_ttl: ttl,
            bind_addr,
            db_pool: None,
        }
    }

    /// Use PostgreSQL-backed repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
