/// API сервер для шага очистки данных

use anyhow::Context;

use customer_satisfaction::api::{router, AppState};
use customer_satisfaction::CleaningSettings;

fn load_settings() -> anyhow::Result<CleaningSettings> {
    let settings: CleaningSettings = match std::env::var("CLEANING_SETTINGS") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings file {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse settings file {}", path))?
        }
        Err(_) => CleaningSettings::default(),
    };
    settings.validate().context("Invalid cleaning settings")?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = load_settings()?;
    let port: u16 = match std::env::var("PORT") {
        Ok(p) => p.parse().with_context(|| format!("Invalid PORT: {}", p))?,
        Err(_) => 8000,
    };

    let app = router(AppState::new(settings));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
