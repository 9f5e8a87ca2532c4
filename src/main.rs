use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ilmquest::infrastructure::AppState;
use ilmquest::{config, db, seed, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ilmquest=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();
    let jwt_secret = match config.jwt_secret() {
        Ok(secret) => secret,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Initialize database
    let db = db::init_db(&config.database_url)
        .await
        .expect("Failed to initialize database");

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&db).await {
            tracing::error!("Failed to seed data: {}", e);
        }
    }

    let state = AppState::new(db, jwt_secret).with_token_ttl(config.jwt_expiry_hours);

    if let Err(e) = server::serve(&config, state).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
