//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod annotations;
pub mod error;
pub mod health;
pub mod images;
pub mod logistics;
pub mod projects;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register the REST API handlers and extractor configuration.
///
/// Handlers read [`state::HttpState`] from application data, which the caller
/// must register. Health probes and static files are mounted by the server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .service(logistics::list_equipment)
        .service(logistics::get_equipment)
        .service(logistics::list_locations)
        .service(logistics::get_location)
        .service(logistics::list_distances)
        .service(logistics::get_distance)
        .service(logistics::list_body_weights)
        .service(logistics::get_body_weight)
        .service(logistics::list_cargo_types)
        .service(logistics::get_cargo_type)
        .service(logistics::list_shipments)
        .service(logistics::get_shipment)
        .service(projects::list_projects)
        .service(projects::create_project)
        .service(projects::delete_project)
        .service(images::list_images)
        .service(images::upload_images)
        .service(images::delete_image)
        .service(annotations::list_annotations)
        .service(annotations::save_annotations)
        .service(annotations::delete_annotation)
        .service(annotations::predict);
}
