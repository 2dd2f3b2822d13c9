use std::sync::Arc;

use cinematch_api::{
    api::{create_router, AppState},
    config::Config,
    services::providers::tmdb::TmdbProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let provider = TmdbProvider::new(config.tmdb_api_key.clone(), config.tmdb_api_url.clone());
    let state = AppState::new(Arc::new(provider));

    // Startup gate: the index must exist before any request is served.
    let corpus_size = state
        .build_index()
        .await
        .map_err(|e| anyhow::anyhow!("Initial index build failed: {}", e))?;
    tracing::info!(corpus_size = corpus_size, "Startup index build complete");

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
