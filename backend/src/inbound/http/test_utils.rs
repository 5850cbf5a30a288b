//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{MockAnnotationCommand, MockAnnotationQuery, MockLogisticsQuery};
use crate::inbound::http::state::HttpState;

/// Port doubles backing a test application.
///
/// Mocks without expectations panic when called, so each test only sets up
/// the ports its handler is meant to touch.
#[derive(Default)]
pub struct MockPorts {
    pub logistics: MockLogisticsQuery,
    pub annotations: MockAnnotationCommand,
    pub annotations_query: MockAnnotationQuery,
}

impl MockPorts {
    /// Wrap the mocks into shared handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.logistics),
            Arc::new(self.annotations),
            Arc::new(self.annotations_query),
        ))
    }
}

/// Build an application exposing every API route over `ports`.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(ports.into_state())
        .configure(super::configure)
}
