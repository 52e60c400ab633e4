use crate::methods::routes::USERS_HELLO_PATH;
use crate::middleware::authentication::Principal;

#[utoipa::path(
    get,
    path = USERS_HELLO_PATH,
    tag = "users",
    responses(
        (status = 200, description = "Name of the authenticated caller", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn hello(principal: Principal) -> String {
    principal.username
}
