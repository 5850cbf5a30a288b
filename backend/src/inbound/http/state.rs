//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AnnotationCommand, AnnotationQuery, LogisticsQuery};

/// Largest accepted size of one uploaded file unless configured otherwise.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub logistics: Arc<dyn LogisticsQuery>,
    pub annotations: Arc<dyn AnnotationCommand>,
    pub annotations_query: Arc<dyn AnnotationQuery>,
    /// Per-file cap applied while reading multipart uploads.
    pub max_upload_bytes: usize,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use camino::Utf8Path;
    /// use depot::domain::{AnnotationService, LogisticsService, RandomBoxGenerator};
    /// use depot::inbound::http::state::HttpState;
    /// use depot::outbound::persistence::{
    ///     DbPool, DieselAnnotationRepository, DieselLogisticsRepository, PoolConfig,
    /// };
    /// use depot::outbound::storage::FsImageStore;
    ///
    /// # async fn build() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/depot")).await?;
    /// let store = FsImageStore::open(Utf8Path::new("/data/uploads"))?;
    /// let logistics = LogisticsService::new(Arc::new(DieselLogisticsRepository::new(pool.clone())));
    /// let annotations = Arc::new(AnnotationService::new(
    ///     Arc::new(DieselAnnotationRepository::new(pool)),
    ///     Arc::new(store),
    ///     Arc::new(RandomBoxGenerator),
    /// ));
    /// let state = HttpState::new(Arc::new(logistics), annotations.clone(), annotations);
    /// # let _ = state;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        logistics: Arc<dyn LogisticsQuery>,
        annotations: Arc<dyn AnnotationCommand>,
        annotations_query: Arc<dyn AnnotationQuery>,
    ) -> Self {
        Self {
            logistics,
            annotations,
            annotations_query,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Replace the per-file upload cap.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
