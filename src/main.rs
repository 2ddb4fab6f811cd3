use std::{net::SocketAddr, sync::Arc};

use marquee::{
    AppState, build_app,
    config::{Config, LogFormat},
    db, seed,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    if config.uses_dev_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development secret");
    }

    let db = db::connect_and_migrate(config.database_url.as_str()).await?;
    let state = Arc::new(AppState::new(config, db));

    seed::run(&state.db, &state.users, &state.config, &state.logger).await?;

    let addr = state.config.addr;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,marquee=debug,sqlx=warn"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
