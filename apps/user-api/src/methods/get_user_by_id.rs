use axum::extract::{Path, State};
use axum::Json;
use user_lib::entities::UserResponse;
use uuid::Uuid;

use crate::error::{handle_service_error, ApiError};
use crate::methods::routes::USERS_BY_ID_PATH;
use crate::middleware::authentication::Principal;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = USERS_BY_ID_PATH,
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid UUID"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller lacks the moderator role"),
        (status = 500, description = "User not found or lookup failed"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_by_id(
    Path(id): Path<String>,
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<UserResponse>, ApiError> {
    principal.require_role(&state.moderator_role)?;

    let user_id = Uuid::parse_str(&id).map_err(|_| ApiError::invalid_uuid())?;

    state
        .user_service
        .get_user_by_id(user_id)
        .await
        .map(Json)
        .map_err(|e| handle_service_error(e, &state.env, "get_user_by_id"))
}
