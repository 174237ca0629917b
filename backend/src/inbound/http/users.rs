//! Users API handlers.
//!
//! ```text
//! POST   /users        create a user (id generated when absent)
//! GET    /users/{id}   fetch a user
//! PUT    /users/{id}   replace a user (email set may only grow)
//! DELETE /users/{id}   delete a user (idempotent)
//! ```
//!
//! Handlers stay thin: they hand the raw body to the domain pipeline and
//! wrap the outcome in the response envelope.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::SuccessEnvelope;
use crate::inbound::http::state::HttpState;

/// Translate body-deserialisation failures into the fixed error envelope so
/// no framework-shaped body ever reaches a client.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::new(ErrorCode::InvalidPayload, err.to_string()).into()
}

/// A syntactically invalid id can never address a stored record.
fn parse_user_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// Terminal handler for unmatched routes.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::route_not_found())
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = crate::inbound::http::schemas::UserSchema,
    responses(
        (status = 201, description = "User created", body = crate::inbound::http::schemas::UserEnvelopeSchema),
        (status = 400, description = "Invalid payload or duplicate id", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(SuccessEnvelope::new(user)))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "User found", body = crate::inbound::http::schemas::UserEnvelopeSchema),
        (status = 404, description = "User not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.as_str()).ok_or_else(Error::user_not_found)?;
    let user = state.users.fetch(id).await?;
    Ok(HttpResponse::Ok().json(SuccessEnvelope::new(user)))
}

/// Replace a user. The body must be a complete record whose id matches the
/// URL, and the stored email addresses must all survive.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    request_body = crate::inbound::http::schemas::UserSchema,
    responses(
        (status = 200, description = "User replaced", body = crate::inbound::http::schemas::UserEnvelopeSchema),
        (status = 400, description = "Invalid payload, id mismatch, or email removal", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 404, description = "User not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.as_str()).ok_or_else(Error::user_not_found)?;
    let user = state.users.update(id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SuccessEnvelope::new(user)))
}

/// Delete a user. Responds 204 whether or not the record existed.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 204, description = "User deleted (or was already absent)"),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    if let Some(id) = parse_user_id(path.as_str()) {
        state.users.delete(id).await?;
    }
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::json;

    use crate::domain::UserService;
    use crate::outbound::persistence::InMemoryUserStore;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let service = UserService::new(Arc::new(InMemoryUserStore::new()));
        App::new()
            .app_data(web::Data::new(HttpState::new(Arc::new(service))))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(create_user)
            .service(get_user)
            .service(update_user)
            .service(delete_user)
            .default_service(web::route().to(route_not_found))
    }

    #[actix_web::test]
    async fn create_responds_created_with_the_envelope() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({
                "firstName": "John",
                "lastName": "Doe",
                "emails": ["john@x.com"],
                "dob": "1990-01-01",
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let value: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(value.get("status"), Some(&json!("success")));
    }

    #[actix_web::test]
    async fn get_with_a_malformed_id_is_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::get()
            .uri("/users/not-a-uuid")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let value: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(value.get("message"), Some(&json!("User not found")));
    }

    #[actix_web::test]
    async fn put_with_a_malformed_id_is_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::put()
            .uri("/users/not-a-uuid")
            .set_json(json!({}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_with_a_malformed_id_stays_idempotent() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::delete()
            .uri("/users/not-a-uuid")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn malformed_json_body_uses_the_error_envelope() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(value.get("status"), Some(&json!("error")));
    }

    #[actix_web::test]
    async fn unmatched_routes_use_the_error_envelope() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::get().uri("/nope").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let value: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value,
            json!({ "status": "error", "message": "Route not found" })
        );
    }
}
