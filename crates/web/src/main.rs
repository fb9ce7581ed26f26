use anyhow::Context;
use axum::{Router, middleware as axum_middleware};
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod clients;
mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use middleware::auth::session_gate;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::payments::handlers::create_order,
        features::payments::handlers::verify_payment,
        features::cron::handlers::weekend_notifications,
        features::users::handlers::search_users,
        features::users::handlers::get_profile,
        features::users::handlers::update_profile,
        features::users::handlers::get_streak,
        features::users::handlers::use_streak_freeze,
        features::users::handlers::list_notifications,
        features::users::handlers::mark_notification_read,
        features::users::handlers::list_achievements,
        features::auth::handlers::callback,
    ),
    components(
        schemas(
            storage::dto::payment::CreateOrderRequest,
            storage::dto::payment::CreateOrderResponse,
            storage::dto::payment::VerifyPaymentRequest,
            storage::dto::payment::VerifyPaymentResponse,
            storage::dto::user::UpdateProfileRequest,
            storage::dto::user::UserSearchResult,
            storage::dto::user::AchievementDetail,
            storage::dto::user::ProfileResponse,
            storage::models::User,
            storage::models::Contest,
            storage::models::ContestParticipant,
            storage::models::Payment,
            storage::models::PaymentStatus,
            storage::models::Streak,
            storage::models::Notification,
            storage::models::Badge,
            storage::models::UserAchievement,
            features::cron::handlers::TriggerResponse,
        )
    ),
    tags(
        (name = "payments", description = "Gateway order creation and verification"),
        (name = "cron", description = "Scheduler-triggered batch notifications"),
        (name = "users", description = "Profile, streak and notification endpoints"),
        (name = "auth", description = "OAuth callback"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Access token")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting FluxCode API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let bind_address = format!("{}:{}", config.host, config.port);
    let state = AppState::new(db, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/razorpay", features::payments::routes::routes(state.clone()))
        .nest("/api/cron", features::cron::routes::routes())
        .nest("/api/users", features::users::routes::routes(state.clone()))
        .nest("/auth", features::auth::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Page rendering lives in the frontend; the fallback exists so
        // the session gate still fronts page paths.
        .fallback(|| async { axum::http::StatusCode::NOT_FOUND })
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    axum::serve(listener, app)
        .await
        .context("Server exited with error")?;

    Ok(())
}
