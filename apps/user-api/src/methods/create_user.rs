use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::collections::BTreeMap;
use user_lib::entities::UserRequest;

use crate::error::{handle_service_error, ApiError};
use crate::methods::routes::USERS_PATH;
use crate::middleware::authentication::Principal;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = USERS_PATH,
    tag = "users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created"),
        (status = 400, description = "Validation failed, keyed by field", body = BTreeMap<String, String>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller lacks the moderator role"),
        (status = 409, description = "Username or email already taken"),
        (status = 500, description = "Identity provider failure"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    principal.require_role(&state.moderator_role)?;

    let Json(request) = payload?;
    if let Some(violations) = request.violations() {
        tracing::debug!(fields = ?violations.keys().collect::<Vec<_>>(), "user request rejected");
        return Err(ApiError::Validation(violations));
    }

    state
        .user_service
        .create_user(&request)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create_user"))?;

    Ok(StatusCode::OK)
}
