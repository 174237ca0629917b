//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates the HTTP paths and the schema wrappers from
//! `inbound::http::schemas`, keeping the domain types free of framework
//! concerns. Debug builds serve the generated document as JSON for tooling.

use actix_web::{get, web};
use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    ErrorEnvelopeSchema, FieldErrorSchema, UserEnvelopeSchema, UserSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User management API",
        description = "HTTP interface for creating, fetching, replacing, and deleting users."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        FieldErrorSchema,
        UserEnvelopeSchema,
        ErrorEnvelopeSchema
    ))
)]
pub struct ApiDoc;

/// Serve the generated document for tooling and debugging.
#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}
