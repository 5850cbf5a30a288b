//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use depot::inbound::http::state::DEFAULT_MAX_UPLOAD_BYTES;
use depot::outbound::persistence::DbPool;
use depot::outbound::storage::FsImageStore;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) db_pool: DbPool,
    pub(crate) image_store: FsImageStore,
    pub(crate) max_upload_bytes: usize,
}

impl ServerConfig {
    /// Construct a server configuration over an open pool and upload store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, image_store: FsImageStore) -> Self {
        Self {
            bind_addr,
            cors_origins: Vec::new(),
            db_pool,
            image_store,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Allow browser requests from `origins`.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Cap the size of each uploaded file.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
