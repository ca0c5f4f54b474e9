use anyhow::Result;
use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::info;

use hr_api_server::auth::require_auth;
use hr_api_server::config::Settings;
use hr_api_server::database::{schema, DbPool};
use hr_api_server::handlers;
use hr_api_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hr_api_server=debug".to_string()),
        )
        .with_target(true)
        .json()
        .init();

    info!("Starting HR API Server...");

    let settings = Settings::load()?;
    info!("Configuration loaded");

    let db_pool = DbPool::new(&settings.database).await?;
    info!("Database connection established");

    schema::ensure_schema(db_pool.get_pool()).await?;

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    let state = AppState::new(db_pool, settings);
    let app = build_router(state);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    // Public routes (no token required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route(
            "/api/v1/tenants",
            post(handlers::tenants::create_tenant).get(handlers::tenants::list_tenants),
        )
        .route("/api/v1/tenants/{id}", get(handlers::tenants::get_tenant));

    // Everything else requires a valid bearer token
    let protected_routes = Router::new()
        .route(
            "/api/v1/business-units",
            post(handlers::business_units::create_business_unit)
                .get(handlers::business_units::list_business_units),
        )
        .route(
            "/api/v1/business-units/{id}",
            get(handlers::business_units::get_business_unit),
        )
        .route(
            "/api/v1/departments",
            post(handlers::departments::create_department)
                .get(handlers::departments::list_departments),
        )
        .route(
            "/api/v1/departments/{id}",
            get(handlers::departments::get_department),
        )
        .route(
            "/api/v1/job-titles",
            post(handlers::job_titles::create_job_title).get(handlers::job_titles::list_job_titles),
        )
        .route(
            "/api/v1/job-titles/{id}",
            get(handlers::job_titles::get_job_title),
        )
        .route(
            "/api/v1/employees",
            post(handlers::employees::create_employee).get(handlers::employees::list_employees),
        )
        .route(
            "/api/v1/employees/{id}",
            get(handlers::employees::get_employee),
        )
        .route(
            "/api/v1/employees/{id}/hierarchy",
            get(handlers::employees::get_employee_hierarchy),
        )
        .route(
            "/api/v1/users",
            post(handlers::users::create_user).get(handlers::users::list_users),
        )
        .route("/api/v1/users/{id}", get(handlers::users::get_user))
        .route(
            "/api/v1/users/{id}/roles",
            post(handlers::users::grant_user_role).get(handlers::users::list_user_roles),
        )
        .route(
            "/api/v1/users/{id}/roles/{role_id}",
            delete(handlers::users::revoke_user_role),
        )
        .route(
            "/api/v1/roles",
            post(handlers::roles::create_role).get(handlers::roles::list_roles),
        )
        .route("/api/v1/roles/{id}", get(handlers::roles::get_role))
        .route("/api/v1/onboard", post(handlers::onboarding::onboard))
        .route(
            "/api/v1/audit-logs",
            get(handlers::audit::list_audit_logs),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let allowed_origins: Vec<HeaderValue> = state
        .settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(state)
}
