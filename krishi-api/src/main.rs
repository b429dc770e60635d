use chrono::Duration;
use krishi_api::{
    app,
    state::{AppState, AuthConfig},
};
use krishi_rental::{BookingOrchestrator, ProductRepository, RentalRepository};
use krishi_shared::{Clock, SystemClock, TtlCache};
use krishi_store::{DbClient, PgProductRepository, PgRentalRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "krishi_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = krishi_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Krishi rental API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let products: Arc<dyn ProductRepository> = Arc::new(PgProductRepository::new(db.pool.clone()));
    let rentals: Arc<dyn RentalRepository> = Arc::new(PgRentalRepository::new(db.pool.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let bookings = Arc::new(BookingOrchestrator::new(
        products.clone(),
        rentals.clone(),
        clock.clone(),
    ));
    let product_cache = Arc::new(TtlCache::new(
        clock.clone(),
        Duration::seconds(config.booking.product_cache_seconds as i64),
    ));

    let app_state = AppState {
        products,
        rentals,
        bookings,
        product_cache,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
