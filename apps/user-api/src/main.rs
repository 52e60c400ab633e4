use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use user_api::app::{apply_middleware, build_router};
use user_api::config::{server_port, AuthConfig, MiddlewareConfig};
use user_api::constants::{ENV, LOCAL_ENV, SERVICE};
use user_api::keycloak::{KeycloakClient, KeycloakConfig, KeycloakTokenIntrospector};
use user_api::methods::routes::API_PREFIX;
use user_api::shutdown::{serve_with_drain_deadline, shutdown_signal};
use user_api::state::AppState;
use user_lib::user_service::UserService;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(env: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true);

    if env == LOCAL_ENV {
        let pretty_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .pretty();
        registry.with(json_layer).with(pretty_layer).init();
    } else {
        registry.with(json_layer).init();
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let env = std::env::var(ENV)
        .map_err(|_| format!("{} environment variable must be set", ENV))?;

    init_tracing(&env);
    tracing::info!(service = SERVICE, env = %env, "tracing initialized");

    let middleware_config = MiddlewareConfig::from_env();
    tracing::info!(
        rate_limit_per_minute = middleware_config.rate_limit_per_minute,
        rate_limit_burst = middleware_config.rate_limit_burst,
        request_timeout_secs = middleware_config.request_timeout.as_secs(),
        max_body_size = middleware_config.max_body_size,
        cors_origins = ?middleware_config.cors_allowed_origins,
        "middleware configuration loaded"
    );

    let auth_config = AuthConfig::from_env();
    let keycloak_config = Arc::new(KeycloakConfig::from_env());
    if !keycloak_config.is_configured() {
        tracing::warn!("keycloak client secret is empty, provider calls will fail");
    }
    tracing::info!(
        keycloak_url = %keycloak_config.base_url,
        realm = %keycloak_config.realm,
        auth_realm = %keycloak_config.auth_realm,
        moderator_role = %auth_config.moderator_role,
        "identity provider configuration loaded"
    );

    let provider = KeycloakClient::new(keycloak_config.clone())?;
    let authenticator = KeycloakTokenIntrospector::new(keycloak_config.clone())?;
    let user_service = UserService::new(Arc::new(provider), keycloak_config.realm.clone());

    let app_state = AppState {
        user_service: Arc::new(user_service),
        authenticator: Arc::new(authenticator),
        moderator_role: auth_config.moderator_role,
        env: env.clone(),
    };

    let app = apply_middleware(build_router(app_state), &middleware_config)?;

    let port = server_port();
    let addr = format!("0.0.0.0:{}", port);
    let public_url = format!("http://127.0.0.1:{}", port);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("user-api is ready to accept requests at: {}", public_url);
    tracing::info!("API endpoints available at: {}{}", public_url, API_PREFIX);

    let drain_started = Arc::new(Notify::new());
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(
        drain_started.clone(),
        middleware_config.shutdown_timeout,
    ))
    .into_future();

    serve_with_drain_deadline(server, drain_started, middleware_config.shutdown_timeout)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
