//! Builders wiring outbound adapters into the HTTP handler state.

use std::sync::Arc;

use actix_web::web;

use depot::domain::{AnnotationService, LogisticsService, RandomBoxGenerator};
use depot::inbound::http::state::HttpState;
use depot::outbound::persistence::{DbPool, DieselAnnotationRepository, DieselLogisticsRepository};
use depot::outbound::storage::FsImageStore;

/// Build handler state backed by the database and the upload directory.
pub(crate) fn build_http_state(
    pool: &DbPool,
    store: &FsImageStore,
    max_upload_bytes: usize,
) -> web::Data<HttpState> {
    let logistics = Arc::new(LogisticsService::new(Arc::new(
        DieselLogisticsRepository::new(pool.clone()),
    )));
    let annotations = Arc::new(AnnotationService::new(
        Arc::new(DieselAnnotationRepository::new(pool.clone())),
        Arc::new(store.clone()),
        Arc::new(RandomBoxGenerator),
    ));
    web::Data::new(
        HttpState::new(logistics, annotations.clone(), annotations)
            .with_max_upload_bytes(max_upload_bytes),
    )
}
