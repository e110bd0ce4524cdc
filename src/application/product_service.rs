use std::sync::Arc;

use crate::domain::product::{Money, Product, ProductId};
use crate::domain::repository::UnitOfWorkFactory;
use super::dto::RegisterProduct;
use super::errors::ApplicationError;

pub struct ProductService {
    store: Arc<dyn UnitOfWorkFactory>,
}

impl ProductService {
    pub fn new(store: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { store }
    }

    pub async fn register(&self, input: RegisterProduct) -> Result<ProductId, ApplicationError> {
        let product = Product::new(
            ProductId::generate(),
            input.name,
            Money::new(input.price, input.currency),
        );

        let mut uow = self.store.begin().await?;
        uow.products().save(&product).await?;
        uow.commit().await?;

        tracing::info!(product_id = %product.id(), price = %product.price(), "Product registered");
        Ok(product.id())
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, ApplicationError> {
        let mut uow = self.store.begin().await?;
        let product = uow.products().find_by_id(id).await?;
        uow.rollback().await?;
        Ok(product)
    }

    /// Replace the catalog price. Returns `Ok(None)` for an unknown product.
    /// Existing orders keep the price they captured.
    pub async fn update_price(
        &self,
        id: ProductId,
        price: Money,
    ) -> Result<Option<Product>, ApplicationError> {
        let mut uow = self.store.begin().await?;

        let Some(mut product) = uow.products().find_by_id(id).await? else {
            uow.rollback().await?;
            return Ok(None);
        };

        product.change_price(price);
        uow.products().save(&product).await?;
        uow.commit().await?;

        tracing::info!(product_id = %id, price = %product.price(), "Product price changed");
        Ok(Some(product))
    }
}
