use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerId, CustomerRepository};
use crate::domain::order::{Order, OrderId, OrderRepository};
use crate::domain::product::{Product, ProductId, ProductRepository};
use crate::domain::repository::{
    RepositoryError, RepositoryResult, UnitOfWork, UnitOfWorkFactory,
};
use super::records::OrderRecord;

// ============================================================================
// In-Memory Store
// ============================================================================
//
// Used when no DATABASE_URL is configured, and by every test.
//
// Each unit of work stages its writes privately and reads committed state
// plus its own staged writes. Commit applies everything under a single write
// lock, so readers see either none of a unit's writes or all of them.
//
// ============================================================================

#[derive(Default)]
struct Tables {
    customers: HashMap<CustomerId, Customer>,
    products: HashMap<ProductId, Product>,
    orders: HashMap<Uuid, OrderRecord>,
}

impl Tables {
    fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.products.is_empty() && self.orders.is_empty()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    committed: Arc<RwLock<Tables>>,
    fail_commits: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every commit fails with `RepositoryError::Unavailable`
    /// and applies nothing.
    pub fn simulate_commit_failure(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Number of committed orders
    pub async fn order_count(&self) -> usize {
        self.committed.read().await.orders.len()
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryStore {
    async fn begin(&self) -> RepositoryResult<Box<dyn UnitOfWork>> {
        Ok(Box::new(InMemoryUnitOfWork {
            store: self.clone(),
            staged: Tables::default(),
        }))
    }
}

pub struct InMemoryUnitOfWork {
    store: InMemoryStore,
    staged: Tables,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
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
        if self.store.fail_commits.load(Ordering::SeqCst) {
            tracing::warn!("In-memory commit rejected (simulated failure)");
            return Err(RepositoryError::Unavailable("simulated commit failure".to_string()));
        }

        if self.staged.is_empty() {
            return Ok(());
        }

        let this = *self;
        let Tables { customers, products, orders } = this.staged;
        let mut committed = this.store.committed.write().await;

        tracing::debug!(
            customers = customers.len(),
            products = products.len(),
            orders = orders.len(),
            "Committing in-memory unit of work"
        );

        committed.customers.extend(customers);
        committed.products.extend(products);
        committed.orders.extend(orders);

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepositoryResult<()> {
        tracing::debug!("Discarding in-memory unit of work");
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryUnitOfWork {
    async fn save(&mut self, customer: &Customer) -> RepositoryResult<()> {
        self.staged.customers.insert(customer.id(), customer.clone());
        Ok(())
    }

    async fn find_by_id(&mut self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        if let Some(customer) = self.staged.customers.get(&id) {
            return Ok(Some(customer.clone()));
        }
        Ok(self.store.committed.read().await.customers.get(&id).cloned())
    }
}

#[async_trait]
impl ProductRepository for InMemoryUnitOfWork {
    async fn save(&mut self, product: &Product) -> RepositoryResult<()> {
        self.staged.products.insert(product.id(), product.clone());
        Ok(())
    }

    async fn find_by_id(&mut self, id: ProductId) -> RepositoryResult<Option<Product>> {
        if let Some(product) = self.staged.products.get(&id) {
            return Ok(Some(product.clone()));
        }
        Ok(self.store.committed.read().await.products.get(&id).cloned())
    }
}

#[async_trait]
impl OrderRepository for InMemoryUnitOfWork {
    async fn save(&mut self, order: &Order) -> RepositoryResult<()> {
        let record = OrderRecord::from(order);
        self.staged.orders.insert(record.id, record);
        Ok(())
    }

    async fn find_by_id(&mut self, id: OrderId) -> RepositoryResult<Option<Order>> {
        let record = match self.staged.orders.get(&id.as_uuid()) {
            Some(record) => Some(record.clone()),
            None => self.store.committed.read().await.orders.get(&id.as_uuid()).cloned(),
        };

        record.map(OrderRecord::into_order).transpose()
    }
}
