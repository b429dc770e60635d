use krishi_catalog::Product;
use krishi_rental::{BookingOrchestrator, ProductRepository, RentalRepository};
use krishi_shared::TtlCache;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub rentals: Arc<dyn RentalRepository>,
    pub bookings: Arc<BookingOrchestrator>,
    pub product_cache: Arc<TtlCache<Uuid, Product>>,
    pub auth: AuthConfig,
}
