use paybridge::{
    config::AppConfig,
    db,
    ledger::LedgerClient,
    model::{ContactsCache, ModelClient},
    payments::PaymentsBackend,
    speech::SpeechClient,
    wallet::WalletDirectory,
    web,
};
use sqlx::sqlite::SqlitePoolOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up .env before configuration is read
    dotenvy::dotenv().ok();

    // Initialize logging first
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paybridge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PayBridge v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::init()?;
    info!("Configuration loaded");

    // Initialize database
    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    info!("Database connected: {}", config.database.url);

    // Run migrations
    db::init_db(&pool).await?;

    // Wallet directory from configuration
    let directory = Arc::new(WalletDirectory::from_config(&config.wallets));
    info!(
        "Wallet directory loaded: {} entries",
        directory.known_names().len()
    );
    if directory.known_names().is_empty() {
        warn!("No wallets configured. Payments will fail until wallets are added to the config.");
    }

    // Outbound service clients
    let ledger = Arc::new(LedgerClient::new(config));
    let backend = Arc::new(PaymentsBackend::new(config));
    let model = Arc::new(ModelClient::new(config));
    let speech = Arc::new(SpeechClient::new(config));

    // Check ledger gateway health
    match ledger.health_check().await {
        Ok(health) => {
            info!(
                "Ledger gateway healthy: status={}, network={}",
                health.status, health.network
            );
        }
        Err(e) => {
            warn!(
                "Ledger gateway not available: {}. \
                Submissions will fail until the gateway is started.",
                e
            );
        }
    }

    // Prime the contacts summary used by the extraction prompt
    let contacts = Arc::new(ContactsCache::new());
    contacts.refresh(&pool).await?;

    // Create web server state
    let state = web::AppState {
        pool,
        directory,
        ledger,
        backend,
        model,
        speech,
        contacts,
        audio_dir: PathBuf::from(&config.speech.audio_dir),
    };

    // Create web router and serve
    let app = web::create_router(state);

    let addr = format!("{}:{}", config.web.host, config.web.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
