pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod projections;
pub mod shared;
pub mod system;
pub mod usecases;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use axum::{
        routing::{get, post, put},
        Extension, Router,
    };
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Log directory next to the working dir
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Keep application logs, quiet the SQL layer
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Request logging middleware: method, path, status, elapsed, size
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        use axum::body::to_bytes;
        use chrono::Utc;

        let start = std::time::Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let response = next.run(req).await;

        let (parts, body) = response.into_parts();

        let bytes = match to_bytes(body, usize::MAX).await {
            Ok(b) => b,
            Err(_) => {
                let duration = start.elapsed();
                // UTC-3, the office timezone
                let timestamp = Utc::now() - chrono::Duration::hours(3);
                println!(
                    "\x1b[33m{}\x1b[0m | {:>5}ms | {:>10} | {} {:>6} {}",
                    timestamp.format("%H:%M:%S"),
                    duration.as_millis(),
                    "error",
                    parts.status.as_u16(),
                    method,
                    uri.path()
                );
                return Response::from_parts(parts, Body::default());
            }
        };

        let size = bytes.len();
        let duration = start.elapsed();
        let timestamp = Utc::now() - chrono::Duration::hours(3);

        let color_code = if parts.status.as_u16() == 200 {
            "36"
        } else {
            "33"
        };

        println!(
            "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>10} | {} {:>6} {}",
            color_code,
            timestamp.format("%H:%M:%S"),
            duration.as_millis(),
            size,
            parts.status.as_u16(),
            method,
            uri.path()
        );

        Response::from_parts(parts, Body::from(bytes))
    }

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    shared::config::init(config);

    shared::data::db::initialize_database(db_path.to_str())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // Role cache is owned here and injected; sign-out invalidates it
    let role_cache = Arc::new(system::auth::RoleCache::new());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES
        // ========================================
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user),
        )
        .route(
            "/api/system/auth/signout",
            post(system::handlers::auth::signout),
        )
        // ========================================
        // INDICATOR ADMINISTRATION
        // ========================================
        .route(
            "/api/indicator",
            get(handlers::a001_indicator::list_all).post(handlers::a001_indicator::create),
        )
        .route(
            "/api/indicator/:id",
            get(handlers::a001_indicator::get_by_id)
                .put(handlers::a001_indicator::update)
                .delete(handlers::a001_indicator::delete),
        )
        // Indicator values
        .route(
            "/api/indicator_value",
            get(handlers::a002_indicator_value::list).post(handlers::a002_indicator_value::create),
        )
        .route(
            "/api/indicator_value/:id",
            put(handlers::a002_indicator_value::update)
                .delete(handlers::a002_indicator_value::delete),
        )
        // ========================================
        // ORGANIZATION
        // ========================================
        .route(
            "/api/squad",
            get(handlers::a003_squad::list_all).post(handlers::a003_squad::create),
        )
        .route(
            "/api/squad/:id",
            get(handlers::a003_squad::get_by_id)
                .put(handlers::a003_squad::update)
                .delete(handlers::a003_squad::delete),
        )
        .route(
            "/api/professional",
            get(handlers::a004_professional::list_all).post(handlers::a004_professional::create),
        )
        .route(
            "/api/professional/:id",
            get(handlers::a004_professional::get_by_id)
                .put(handlers::a004_professional::update)
                .delete(handlers::a004_professional::delete),
        )
        .route(
            "/api/job_role",
            get(handlers::a005_job_role::list_all).post(handlers::a005_job_role::create),
        )
        .route(
            "/api/job_role/:id",
            get(handlers::a005_job_role::get_by_id)
                .put(handlers::a005_job_role::update)
                .delete(handlers::a005_job_role::delete),
        )
        .route(
            "/api/p900/organogram",
            get(handlers::p900_organogram::get),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/d400/dashboard-data",
            get(handlers::d400_dashboard_data::fetch).merge(
                put(handlers::d400_dashboard_data::save).route_layer(middleware::from_fn(
                    system::auth::middleware::require_admin,
                )),
            ),
        )
        // UseCase u501: bulk value import
        .route(
            "/api/u501/import",
            post(handlers::u501_bulk_import::import),
        )
        .route(
            "/api/u501/template",
            get(handlers::u501_bulk_import::template),
        )
        .route(
            "/api/u501/batches",
            get(handlers::u501_bulk_import::list_batches),
        )
        // D401 indicator overview
        .route(
            "/api/d401/overview",
            get(handlers::d401_indicator_overview::get_overview),
        )
        .layer(middleware::from_fn(system::auth::middleware::attach_identity))
        .layer(Extension(role_cache))
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], 3000).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port 3000 is already in use. Please ensure no other process is using this port."
                );
            } else {
                tracing::error!("Failed to bind to port 3000. Error: {}", e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
