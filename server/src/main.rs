use frota_server::{
    config::Config, routes, services::auth::AuthService, state::AppState,
    store::credentials::CredentialStore, store::vehicles::VehicleStore,
};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 0. Load .env file immediately
    // Silently ignores a missing .env, real deployments set the variables directly.
    dotenvy::dotenv().ok();

    // 1. Initialize Sentry (if configured)
    // The guard has to stay alive for events to be flushed. No DSN means a no-op client.
    let _guard = sentry::init((std::env::var("SENTRY_DSN").ok(), sentry::ClientOptions {
        release: sentry::release_name!(),
        traces_sample_rate: 1.0,
        ..Default::default()
    }));

    // 2. Initialize logging
    // Respects RUST_LOG, defaults to debug for the server and tower_http.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "frota_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    tracing::info!("Starting Frota API...");

    // 3. Load configuration
    // Fails fast if JWT_SECRET is missing.
    let config = Config::from_env()?;

    // 4. Wire up the credential store and auth service
    // The file doesn't have to exist yet; until `frota add-user` creates it, nobody can log in.
    let credentials = CredentialStore::new(&config.credentials_file);
    if !credentials.path().exists() {
        tracing::warn!(
            path = %credentials.path().display(),
            "Credentials file not found, every login will be rejected until a user is added"
        );
    }
    let auth = AuthService::new(credentials, &config.jwt_secret, config.token_ttl);

    // 5. Build the vehicle store
    let vehicles = if config.seed_demo_fleet {
        VehicleStore::seeded()
    } else {
        VehicleStore::new()
    };
    tracing::info!("Vehicle store ready with {} vehicles", vehicles.len());

    let state = AppState::new(vehicles, auth);
    let app = routes::create_routes(state);

    // 6. Start the server
    // 0.0.0.0 so it binds to all interfaces (necessary in Docker).
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
