use async_trait::async_trait;
use chrono::{DateTime, Utc};
use krishi_catalog::{Product, ProductType};
use krishi_rental::repository::{ProductRepository, RepoError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    provider_id: Uuid,
    name: String,
    description: Option<String>,
    product_type: String,
    rental_price_per_day: Option<i64>,
    rental_price_per_week: Option<i64>,
    rental_price_per_month: Option<i64>,
    min_rental_days: Option<i32>,
    max_rental_days: Option<i32>,
    requires_deposit: bool,
    deposit_amount: Option<i64>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepoError> {
        let product_type: ProductType = self.product_type.parse().map_err(RepoError::storage)?;

        Ok(Product {
            id: self.id,
            provider_id: self.provider_id,
            name: self.name,
            description: self.description,
            product_type,
            rental_price_per_day: self.rental_price_per_day,
            rental_price_per_week: self.rental_price_per_week,
            rental_price_per_month: self.rental_price_per_month,
            min_rental_days: self.min_rental_days,
            max_rental_days: self.max_rental_days,
            requires_deposit: self.requires_deposit,
            deposit_amount: self.deposit_amount,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, provider_id, name, description, product_type,
                   rental_price_per_day, rental_price_per_week, rental_price_per_month,
                   min_rental_days, max_rental_days,
                   requires_deposit, deposit_amount,
                   is_active, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::storage)?;

        row.map(ProductRow::into_product).transpose()
    }
}
