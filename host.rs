use crate::*;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Full application router: JSON API under `/api`, htmx UI at `/`.
pub fn router(db: Db) -> Router {
    let app: SharedApp = Arc::new(RwLock::new(App::new(Handlers::new(db.clone()))));
    Router::new()
        .nest("/api", api_router(db))
        .merge(ui_router(app))
        .route("/health", get(StatusCode::OK))
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(CompressionLayer::new())
                .layer(TraceLayer::new_for_http()),
        )
}

pub async fn serve(router: Router) -> Result {
    let addr = CONFIG.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("starting server at http://{addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    OK
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
    }
}
