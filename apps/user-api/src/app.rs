use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use user_lib::entities::{UserRequest, UserResponse};

use crate::config::MiddlewareConfig;
use crate::methods::create_user::{__path_create_user, create_user};
use crate::methods::get_user_by_id::{__path_get_user_by_id, get_user_by_id};
use crate::methods::health_check::health_check;
use crate::methods::hello::{__path_hello, hello};
use crate::methods::routes::{
    API_PREFIX, OPENAPI_JSON_PATH, SERVICE_DOCS_PATH, SERVICE_HEALTH_PATH, USERS_BY_ID_PATH,
    USERS_HELLO_PATH, USERS_PATH,
};
use crate::state::AppState;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(create_user, get_user_by_id, hello),
    components(schemas(UserRequest, UserResponse)),
    modifiers(&BearerAuth),
    servers((url = "/api")),
    tags(
        (name = "users", description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Routes without the outer middleware stack.
pub fn build_router(state: AppState) -> Router {
    // The static hello segment wins over the {id} capture
    let api_routes = Router::new()
        .route(USERS_PATH, post(create_user))
        .route(USERS_HELLO_PATH, get(hello))
        .route(USERS_BY_ID_PATH, get(get_user_by_id));

    let root_routes = Router::new()
        .route(SERVICE_HEALTH_PATH, get(health_check))
        .merge(SwaggerUi::new(SERVICE_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));

    Router::new()
        .nest(API_PREFIX, api_routes)
        .merge(root_routes)
        .with_state(state)
}

/// Wrap the router in the middleware stack.
/// Order: Request → Rate Limit → Timeout → CORS → Body Limit → Request ID → Trace → Handler
pub fn apply_middleware(
    mut app: Router,
    config: &MiddlewareConfig,
) -> Result<Router, Box<dyn std::error::Error>> {
    // 1. Trace layer (innermost - closest to handler)
    app = app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(tracing::Level::DEBUG)),
    );

    // 2. Request ID layers
    let x_request_id = HeaderName::from_static("x-request-id");
    app = app
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid));

    // 3. Body limit layer
    app = app.layer(RequestBodyLimitLayer::new(config.max_body_size));

    // 4. CORS layer
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, x_request_id]);
    let cors_layer = if config.allows_any_origin() {
        cors_layer.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors_layer.allow_origin(origins)
    };
    app = app.layer(cors_layer);

    // 5. Timeout layer (returns 408 Request Timeout)
    app = app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        config.request_timeout,
    ));

    // 6. Rate limiting layer (outermost)
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(config.replenish_interval_ms())
            .burst_size(config.rate_limit_burst)
            .finish()
            .ok_or("invalid rate limit configuration")?,
    );
    app = app.layer(GovernorLayer {
        config: governor_conf,
    });

    Ok(app)
}
