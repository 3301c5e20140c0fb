mod app_state;
mod config;
mod router;
mod routes;

use habitus::{snapshot, HabitStore};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let settings = config::read_config().expect("Failed to read configuration");

    let habits = match settings.storage.snapshot_path {
        Some(ref path) => snapshot::load(path),
        None => Vec::new(),
    };
    tracing::info!("loaded {} habits", habits.len());

    let app_state = AppState::new(
        HabitStore::from_habits(habits),
        settings.storage.snapshot_path.clone(),
    );
    let app = router::create(app_state, &settings);

    let address = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("listening on {address}");
    axum::serve(listener, app).await?;

    Ok(())
}
