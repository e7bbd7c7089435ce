use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_desk::infrastructure::AppState;
use travel_desk::{config, db, seed, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_desk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database
    let db = db::init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");

    if config.seed_data {
        if let Err(e) = seed::seed_reference_data(&db).await {
            tracing::error!("Failed to seed data: {}", e);
        }
    } else {
        tracing::info!("Seeding disabled via SEED_DATA");
    }

    if let Err(e) = tokio::fs::create_dir_all(&config.upload_dir).await {
        tracing::warn!(
            "Could not create upload directory {}: {}",
            config.upload_dir.display(),
            e
        );
    }

    let state = AppState::new(db, config.upload_dir.clone());
    let app = server::build_router(state, &config);

    server::serve(app, config.port)
        .await
        .expect("Failed to start server");
}
