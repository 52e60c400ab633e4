use crate::methods::routes::SERVICE_HEALTH_PATH;

/// Liveness probe; does not reach the identity provider.
#[utoipa::path(
    get,
    path = SERVICE_HEALTH_PATH,
    tag = "service",
    responses(
        (status = 200, description = "Service is running", body = String),
    )
)]
pub async fn health_check() -> &'static str {
    "OK"
}
