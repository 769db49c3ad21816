//! HTTP boundary: axum router and handlers.
//!
//! Handlers are thin: resolve the caller's identity, call the service,
//! map the error taxonomy onto status codes.  Bodies are JSON; errors are
//! `{"error": "..."}` with internal detail logged, never leaked.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    auth::TokenVerifier,
    error::ServiceError,
    service::{ContactInput, ContactService, ContactView},
};

#[derive(Clone)]
pub struct AppState {
    pub service: ContactService,
    pub verifier: TokenVerifier,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .with_state(state)
}

/// Resolve the caller from `Authorization: Bearer <token>`.  Fails before
/// any store access.
fn resolve_identity(verifier: &TokenVerifier, headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ServiceError::Unauthenticated)?;
    verifier
        .verify(token)
        .ok_or(ServiceError::Unauthenticated.into())
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

#[derive(Deserialize)]
struct ListParams {
    q: Option<String>,
}

async fn create_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<ContactInput>,
) -> Result<Json<ContactView>, ApiError> {
    let owner = resolve_identity(&state.verifier, &headers)?;
    let view = state.service.create_contact(&owner, input).await?;
    Ok(Json(view))
}

async fn list_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ContactView>>, ApiError> {
    let owner = resolve_identity(&state.verifier, &headers)?;
    let views = match params.q.as_deref() {
        Some(q) => state.service.search_contacts(&owner, q).await?,
        None => state.service.list_contacts(&owner).await?,
    };
    Ok(Json(views))
}

async fn get_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ContactView>, ApiError> {
    let owner = resolve_identity(&state.verifier, &headers)?;
    let view = state.service.get_contact(&owner, &id).await?;
    Ok(Json(view))
}

async fn update_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<ContactInput>,
) -> Result<Json<ContactView>, ApiError> {
    let owner = resolve_identity(&state.verifier, &headers)?;
    let view = state.service.update_contact(&owner, &id, input).await?;
    Ok(Json(view))
}

async fn delete_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let owner = resolve_identity(&state.verifier, &headers)?;
    state.service.delete_contact(&owner, &id).await?;
    Ok(Json(serde_json::json!({"success": true})))
}

/// Wrapper so `?` works in handlers while the status mapping lives in one
/// place.
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ServiceError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ServiceError::NotFoundOrUnauthorized => {
                (StatusCode::NOT_FOUND, "Not found or unauthorized".to_string())
            }
            ServiceError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::Decode(err) => {
                tracing::error!(error = %err, "field crypto failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            ServiceError::Internal(err) => {
                tracing::error!(error = %err, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}
