mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::analysis::{routes as analysis_routes, services::analyzer_from_config};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::{AuthService, TokenService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::geo::models::Coordinates;
use crate::features::geo::routes as geo_routes;
use crate::features::geo::services::{FixedLocationProvider, LocationProvider};
use crate::features::reports::routes as reports_routes;
use crate::features::reports::services::{ReportService, WizardService};
use crate::features::uploads::routes as uploads_routes;
use crate::features::uploads::services::{ImageStore, SimulatedImageStore, UploadPipeline};
use crate::features::weather::routes as weather_routes;
use crate::features::weather::services::{MockWeatherProvider, WeatherProvider};
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Initialize auth services with the demo accounts
    let token_service = Arc::new(TokenService::new(config.auth.clone()));
    let auth_service =
        Arc::new(AuthService::with_demo_users(Arc::clone(&token_service)).await);
    tracing::info!("Auth service initialized (demo accounts seeded)");

    // Initialize the upload pipeline (simulated store + configured analyzer)
    let image_store: Arc<dyn ImageStore> = Arc::new(SimulatedImageStore::new(
        config.simulation.upload_latency,
        config.simulation.upload_base_url.clone(),
    ));
    let analyzer = analyzer_from_config(&config.simulation)
        .map_err(|e| anyhow::anyhow!("Failed to initialize analyzer: {}", e))?;
    let upload_pipeline = Arc::new(UploadPipeline::new(
        Arc::clone(&image_store),
        Arc::clone(&analyzer),
    ));
    tracing::info!("Upload pipeline initialized");

    // Initialize the geolocation provider
    let location_provider: Arc<dyn LocationProvider> =
        Arc::new(FixedLocationProvider::from_config(&config.simulation));
    tracing::info!(
        "Location provider initialized (enabled: {})",
        config.simulation.location_enabled
    );

    // Initialize the weather provider
    let weather_provider: Arc<dyn WeatherProvider> = Arc::new(MockWeatherProvider);
    tracing::info!("Weather provider initialized");

    // Initialize the report collection with the demo city's reports
    let report_service = Arc::new(ReportService::seeded());
    tracing::info!("Report service initialized (seed data loaded)");

    // Initialize the wizard
    let wizard_service = Arc::new(WizardService::new(
        Arc::clone(&upload_pipeline),
        Arc::clone(&location_provider),
        Arc::clone(&report_service),
    ));
    tracing::info!("Wizard service initialized");

    // Initialize the dashboard
    let city_center = Coordinates::new(
        config.simulation.location_lat,
        config.simulation.location_lng,
    );
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::clone(&report_service),
        Arc::clone(&weather_provider),
        city_center,
    ));
    tracing::info!("Dashboard service initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(reports_routes::protected_routes(Arc::clone(&report_service)))
        .merge(reports_routes::wizard_routes(Arc::clone(&wizard_service)))
        .merge(uploads_routes::protected_routes(Arc::clone(&upload_pipeline)))
        .merge(analysis_routes::protected_routes(Arc::clone(&analyzer)))
        .merge(geo_routes::protected_routes(Arc::clone(&location_provider)))
        .merge(weather_routes::protected_routes(Arc::clone(&weather_provider)))
        .merge(dashboard_routes::protected_routes(Arc::clone(
            &dashboard_service,
        )))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&token_service),
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new().merge(auth_routes::public_routes(auth_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(axum::extract::DefaultBodyLimit::max(
            config.app.max_request_body_size,
        ))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
