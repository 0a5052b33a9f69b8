//! Axum adapters over the framework-independent authenticators.
//!
//! The pipeline per protected route is an explicit ordered chain:
//! authenticate (session or device key, never both) → authorize →
//! handle. Each stage either continues with the resolved context in
//! the request extensions or short-circuits with a rejection.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use kantin_auth::authorize::{AccessDecision, authorize_roles};
use kantin_core::models::user::{Role, User};

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the device API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Session authentication stage: resolves the bearer token to a live
/// [`User`] and attaches it to the request.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let user = state.sessions.authenticate(authorization).await?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Device authentication stage: resolves the API key to its school
/// record and attaches it to the request. Mutually exclusive with
/// [`require_session`] on any route.
pub async fn require_device_key(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    let school = state.devices.authenticate(api_key).await?;

    req.extensions_mut().insert(school);
    Ok(next.run(req).await)
}

/// Authorization stage. The permitted set is declared per route at
/// composition time:
///
/// ```ignore
/// .route_layer(middleware::from_fn(|req: Request, next: Next| {
///     require_roles(req, next, STAFF_ROLES)
/// }))
/// ```
///
/// Must sit inside a [`require_session`] layer; a missing user
/// extension means the pipeline was composed wrong and is reported as
/// an internal error, not as a rejection of the caller.
pub async fn require_roles(
    req: Request,
    next: Next,
    permitted: &'static [Role],
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<User>()
        .ok_or_else(|| ApiError::internal("role check reached without an authenticated session"))?;

    match authorize_roles(user.role, permitted) {
        AccessDecision::Granted => Ok(next.run(req).await),
        AccessDecision::Denied { reason } => Err(ApiError::forbidden(reason)),
    }
}
