use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerId, CustomerRepository, Email};
use crate::domain::order::{Order, OrderId, OrderRepository};
use crate::domain::product::{Money, Product, ProductId, ProductRepository};
use crate::domain::repository::{
    RepositoryError, RepositoryResult, UnitOfWork, UnitOfWorkFactory,
};
use crate::utils::{retry_with_backoff, RetryConfig, RetryResult};
use super::records::{OrderItemRecord, OrderRecord};

// ============================================================================
// PostgreSQL Store
// ============================================================================
//
// One sqlx transaction per unit of work. An order is written as a header row
// plus one row per item; `position` keeps the item order stable on reload.
// A PgUnitOfWork dropped without commit is rolled back by sqlx.
//
// ============================================================================

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS products (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    price NUMERIC NOT NULL,
    currency VARCHAR(10) NOT NULL
);

CREATE TABLE IF NOT EXISTS orders (
    id UUID PRIMARY KEY,
    customer_id UUID NOT NULL,
    status VARCHAR(50) NOT NULL
);

CREATE TABLE IF NOT EXISTS order_items (
    id UUID PRIMARY KEY,
    order_id UUID NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    product_id UUID NOT NULL,
    quantity INTEGER NOT NULL,
    price NUMERIC NOT NULL
);

CREATE INDEX IF NOT EXISTS order_items_order_position_idx
    ON order_items (order_id, position);
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect with exponential backoff; the database is often still
    /// starting when the service boots.
    pub async fn connect(url: &str, max_connections: u32, retry: RetryConfig) -> Result<Self> {
        let result = retry_with_backoff(retry, |attempt| {
            tracing::info!(attempt = attempt, "Connecting to PostgreSQL...");
            PgPoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(Duration::from_secs(5))
                .connect(url)
        })
        .await;

        match result {
            RetryResult::Success(pool) => Ok(Self { pool }),
            RetryResult::Failed(e) => Err(anyhow!("Failed to connect to PostgreSQL: {}", e)),
        }
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        tracing::info!("PostgreSQL schema ready");
        Ok(())
    }
}

#[async_trait]
impl UnitOfWorkFactory for PgStore {
    async fn begin(&self) -> RepositoryResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }
}

pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    fn customers(&mut self) -> &mut dyn CustomerRepository {
        self
    }

    fn products(&mut self) -> &mut dyn ProductRepository {
        self
    }

    fn orders(&mut self) -> &mut dyn OrderRepository {
        self
    }

    async fn commit(self: Box<Self>) -> RepositoryResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepositoryResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

// ============================================================================
// Row Mapping
// ============================================================================

fn customer_from_row(row: &PgRow) -> RepositoryResult<Customer> {
    let id: Uuid = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let email: String = row.try_get("email")?;

    let email = Email::new(email)
        .map_err(|e| RepositoryError::CorruptRecord(format!("customer {}: {}", id, e)))?;

    Ok(Customer::new(CustomerId::from_uuid(id), name, email))
}

fn product_from_row(row: &PgRow) -> RepositoryResult<Product> {
    let id: Uuid = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let price: Decimal = row.try_get("price")?;
    let currency: String = row.try_get("currency")?;

    Ok(Product::new(ProductId::from_uuid(id), name, Money::new(price, currency)))
}

fn order_item_from_row(row: &PgRow) -> RepositoryResult<OrderItemRecord> {
    Ok(OrderItemRecord {
        id: row.try_get("id")?,
        product_id: row.try_get("product_id")?,
        quantity: row.try_get("quantity")?,
        price: row.try_get("price")?,
    })
}

// ============================================================================
// Repositories
// ============================================================================

#[async_trait]
impl CustomerRepository for PgUnitOfWork {
    async fn save(&mut self, customer: &Customer) -> RepositoryResult<()> {
        sqlx::query(
            "INSERT INTO customers (id, name, email) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email",
        )
        .bind(customer.id().as_uuid())
        .bind(customer.name())
        .bind(customer.email().as_str())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn find_by_id(&mut self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        sqlx::query("SELECT id, name, email FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&mut *self.tx)
            .await?
            .as_ref()
            .map(customer_from_row)
            .transpose()
    }
}

#[async_trait]
impl ProductRepository for PgUnitOfWork {
    async fn save(&mut self, product: &Product) -> RepositoryResult<()> {
        sqlx::query(
            "INSERT INTO products (id, name, price, currency) VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE
             SET name = EXCLUDED.name, price = EXCLUDED.price, currency = EXCLUDED.currency",
        )
        .bind(product.id().as_uuid())
        .bind(product.name())
        .bind(product.price().amount())
        .bind(product.price().currency())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn find_by_id(&mut self, id: ProductId) -> RepositoryResult<Option<Product>> {
        sqlx::query("SELECT id, name, price, currency FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&mut *self.tx)
            .await?
            .as_ref()
            .map(product_from_row)
            .transpose()
    }
}

#[async_trait]
impl OrderRepository for PgUnitOfWork {
    async fn save(&mut self, order: &Order) -> RepositoryResult<()> {
        let record = OrderRecord::from(order);

        sqlx::query(
            "INSERT INTO orders (id, customer_id, status) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET customer_id = EXCLUDED.customer_id, status = EXCLUDED.status",
        )
        .bind(record.id)
        .bind(record.customer_id)
        .bind(record.status.as_str())
        .execute(&mut *self.tx)
        .await?;

        // Items are replaced wholesale so the stored list always matches the aggregate
        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(record.id)
            .execute(&mut *self.tx)
            .await?;

        for (position, item) in record.items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_items (id, order_id, position, product_id, quantity, price)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(item.id)
            .bind(record.id)
            .bind(position as i32)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *self.tx)
            .await?;
        }

        tracing::debug!(
            order_id = %record.id,
            item_count = record.items.len(),
            "Staged order in PostgreSQL transaction"
        );

        Ok(())
    }

    async fn find_by_id(&mut self, id: OrderId) -> RepositoryResult<Option<Order>> {
        let header = sqlx::query("SELECT id, customer_id, status FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&mut *self.tx)
            .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let items = sqlx::query(
            "SELECT id, product_id, quantity, price FROM order_items
             WHERE order_id = $1 ORDER BY position ASC",
        )
        .bind(id.as_uuid())
        .fetch_all(&mut *self.tx)
        .await?
        .iter()
        .map(order_item_from_row)
        .collect::<RepositoryResult<Vec<_>>>()?;

        let record = OrderRecord {
            id: header.try_get("id")?,
            customer_id: header.try_get("customer_id")?,
            status: header.try_get("status")?,
            items,
        };

        record.into_order().map(Some)
    }
}
