use std::any::Any;

use crate::config::ServerConfig;
use crate::error::Result;
use anyhow::bail;
use axum::http::StatusCode;
use axum::response::Response;
use axum::{response::IntoResponse, routing::get, Router};
use cinelog_app::error::{internal_error_response, not_found_response};
use cinelog_app::rest_api::api_router;
use cinelog_app::state::{AppConfig, AppState};
use cinelog_dal::JsonFileStore;
use futures::FutureExt;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info};

pub async fn run(args: ServerConfig) -> Result<()> {
    let state = build_state(&args).await?;
    run_with_state(args, state).await
}

pub async fn run_with_state(args: ServerConfig, state: AppState) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_graceful_with_state(args, state, shutdown).await
}

pub async fn run_graceful_with_state<S>(
    args: ServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let mut app = main_router(state);

    if !args.no_cors {
        app = app.layer(tower_http::cors::CorsLayer::very_permissive());
    }
    app = app.layer(CatchPanicLayer::custom(handle_panic));

    let ip: std::net::IpAddr = args.listen_address.parse()?;
    let addr = std::net::SocketAddr::from((ip, args.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Listening on {}, available at {}",
        listener.local_addr()?,
        args.base_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(feature = "openapi")]
fn api_docs() -> utoipa::openapi::OpenApi {
    #[derive(utoipa::OpenApi)]
    #[openapi(info(title = "Cinelog", description = "Personal movie collection API"))]
    struct OpenApi;

    use utoipa::OpenApi as _;
    OpenApi::openapi()
        .nest("/api/movies", cinelog_app::rest_api::movie::api_docs())
        .nest("/api", cinelog_app::rest_api::collection::api_docs())
}

fn main_router(state: AppState) -> Router<()> {
    #[allow(unused_mut)]
    let mut router = Router::new()
        .nest("/api", api_router())
        .with_state(state)
        .route("/health", get(health))
        .fallback(fallback);

    #[cfg(feature = "openapi")]
    {
        let docs = api_docs();
        router = router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs),
        );
    }
    router
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn fallback() -> Response {
    not_found_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!("Request handler panicked: {details}");
    internal_error_response()
}

pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let data_file = config.data_file();
    if data_file.is_dir() {
        bail!("Data file {} is a directory", data_file.display());
    }
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            tokio::fs::create_dir_all(parent).await?;
            info!("Created data directory {}", parent.display());
        }
    }

    let app_config = AppConfig {
        default_page_size: config.default_page_size,
    };
    let store = JsonFileStore::new(data_file);
    info!("Using collection file {}", store.path().display());
    Ok(AppState::new(app_config, store))
}
