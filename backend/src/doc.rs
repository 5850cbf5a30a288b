//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST handler together with the schema wrappers
//! from [`crate::inbound::http::schemas`], which describe domain types without
//! coupling them to utoipa. The document backs Swagger UI in debug builds and
//! is exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::annotations::{
    AnnotationRequest, AnnotationResponse, SaveAnnotationsRequest,
};
use crate::inbound::http::health::{MessageResponse, StatusResponse};
use crate::inbound::http::images::ImageResponse;
use crate::inbound::http::logistics::{
    BodyWeightDto, CargoTypeDto, DistanceDto, EquipmentDto, LocationDto, ShipmentDto,
};
use crate::inbound::http::projects::{CreateProjectRequest, ProjectResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Depot API",
        description = "Fleet tracking reads and the image annotation manager."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::logistics::list_equipment,
        crate::inbound::http::logistics::get_equipment,
        crate::inbound::http::logistics::list_locations,
        crate::inbound::http::logistics::get_location,
        crate::inbound::http::logistics::list_distances,
        crate::inbound::http::logistics::get_distance,
        crate::inbound::http::logistics::list_body_weights,
        crate::inbound::http::logistics::get_body_weight,
        crate::inbound::http::logistics::list_cargo_types,
        crate::inbound::http::logistics::get_cargo_type,
        crate::inbound::http::logistics::list_shipments,
        crate::inbound::http::logistics::get_shipment,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::images::list_images,
        crate::inbound::http::images::upload_images,
        crate::inbound::http::images::delete_image,
        crate::inbound::http::annotations::list_annotations,
        crate::inbound::http::annotations::save_annotations,
        crate::inbound::http::annotations::delete_annotation,
        crate::inbound::http::annotations::predict,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        StatusResponse,
        MessageResponse,
        EquipmentDto,
        LocationDto,
        DistanceDto,
        BodyWeightDto,
        CargoTypeDto,
        ShipmentDto,
        CreateProjectRequest,
        ProjectResponse,
        ImageResponse,
        AnnotationRequest,
        SaveAnnotationsRequest,
        AnnotationResponse,
    )),
    tags(
        (name = "health", description = "Liveness, readiness and status routes"),
        (name = "logistics", description = "Read-only fleet tracking records"),
        (name = "projects", description = "Annotation projects"),
        (name = "images", description = "Uploaded images"),
        (name = "annotations", description = "Bounding boxes and suggestions")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[rstest]
    fn equipment_schema_uses_wire_name_for_kind() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let equipment = schemas.get("EquipmentDto").expect("Equipment schema");

        assert_object_schema_has_field(equipment, "type");
    }

    #[rstest]
    #[case("/projects/{id}/images")]
    #[case("/images/{id}/annotations")]
    #[case("/predict/{id}")]
    #[case("/shipments/{id}")]
    #[case("/health/ready")]
    fn document_lists_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
