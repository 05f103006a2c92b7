use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{get, http::header, web, App, HttpResponse, HttpServer, Responder};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use finance_tracker_be::config::AppConfig;
use finance_tracker_be::errors::{json_config, query_config};
use finance_tracker_be::report::store::{PgTransactionStore, TransactionStore};
use finance_tracker_be::{auth, category, openapi, report, transaction};

/// Liveness check
#[get("/")]
async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Health check endpoint that verifies database connectivity
#[get("/health")]
async fn health_check(pool: web::Data<PgPool>) -> impl Responder {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(_) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "database": "disconnected"
        })),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(config.database.acquire_timeout)
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database.url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::ConnectionRefused, e))?;

    let store: Arc<dyn TransactionStore> = Arc::new(PgTransactionStore::new(pool.clone()));
    let jwt = web::Data::new(config.jwt.clone());
    let config = Arc::new(config);

    info!(
        "Starting {} at http://{}:{}",
        config.project_name, config.host, config.port
    );

    // ~5 requests per burst, refilled one per second
    let auth_governor_config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .finish()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid rate limiter config"))?;

    let bind_addr = (config.host.clone(), config.port);

    HttpServer::new(move || {
        let cors_config = Arc::clone(&config);
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                origin
                    .to_str()
                    .map(|o| cors_config.is_origin_allowed(o))
                    .unwrap_or(false)
            })
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(3600);

        App::new()
            // Middleware (order matters: outer to inner)
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Shared state
            .app_data(web::Data::new(pool.clone()))
            .app_data(jwt.clone())
            .app_data(web::Data::from(Arc::clone(&store)))
            .app_data(json_config())
            .app_data(query_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
            .service(root)
            .service(health_check)
            .service(
                web::scope(&config.api_prefix)
                    .service(auth::me)
                    // Category endpoints
                    .service(category::list_categories)
                    .service(category::get_category)
                    .service(category::create_category)
                    .service(category::update_category)
                    .service(category::delete_category)
                    // Transaction endpoints
                    .service(transaction::list_transactions)
                    .service(transaction::get_transaction)
                    .service(transaction::create_transaction)
                    .service(transaction::update_transaction)
                    .service(transaction::delete_transaction)
                    // Reports
                    .service(report::month_report)
                    // Rate-limited auth endpoints (must be last to avoid catching all routes)
                    .service(
                        web::scope("")
                            .wrap(Governor::new(&auth_governor_config))
                            .service(auth::register)
                            .service(auth::login),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
