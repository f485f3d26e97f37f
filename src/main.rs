use learngate::{
    api::{start_api_server, AppState},
    config::AppConfig,
    observability::init_tracing,
    storage::create_pool,
    Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    // This must happen before any config is read from environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let config = AppConfig::from_env()?;
    init_tracing(&config.observability)?;
    config.validate()?;

    info!(
        app_name = APP_NAME,
        version = VERSION,
        environment = ?config.environment,
        "Starting Learngate auth service"
    );

    let pool = create_pool(&config.database).await?;
    let state = AppState::build(pool, &config);

    start_api_server(&config.server, state).await?;

    info!("Auth service shutdown completed");
    Ok(())
}
