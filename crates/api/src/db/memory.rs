//! In-memory stores for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use shop_core::{AdminId, Email, ProductId};

use super::{AdminStore, ProductStore, RepositoryError};
use crate::models::{Admin, Product, ProductDetails};

/// Admin lookups backed by a fixed list.
#[derive(Debug, Default)]
pub struct MemoryAdminStore {
    admins: Vec<Admin>,
    fail: bool,
}

impl MemoryAdminStore {
    /// A store containing one admin per id.
    pub fn with_ids(ids: &[i32]) -> Self {
        let admins = ids
            .iter()
            .map(|&id| Admin {
                admin_id: AdminId::new(id),
                name: format!("Admin {id}"),
                email: Email::parse(&format!("admin{id}@shop.test"))
                    .unwrap_or_else(|e| panic!("test email: {e}")),
            })
            .collect();
        Self {
            admins,
            fail: false,
        }
    }

    /// A store whose every lookup fails.
    pub fn failing() -> Self {
        Self {
            admins: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn find_admin(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.admins.iter().find(|a| a.admin_id == id).cloned())
    }
}

/// Product rows in a map keyed by id.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    rows: Mutex<BTreeMap<ProductId, Product>>,
    next_id: Mutex<i32>,
    fail_writes: AtomicBool,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make inserts and updates fail until turned off.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.lock_rows().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_rows().len()
    }

    fn lock_rows(&self) -> std::sync::MutexGuard<'_, BTreeMap<ProductId, Product>> {
        self.rows.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check_writes(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.lock_rows().values().cloned().collect())
    }

    async fn insert_product(
        &self,
        details: &ProductDetails,
        image: &str,
    ) -> Result<ProductId, RepositoryError> {
        self.check_writes()?;
        let id = {
            let mut next = self
                .next_id
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *next += 1;
            ProductId::new(*next)
        };
        self.lock_rows().insert(
            id,
            Product {
                product_id: id,
                name: details.name.clone(),
                image: image.to_string(),
                price: details.price,
                discount: details.discount,
            },
        );
        Ok(id)
    }

    async fn update_product(
        &self,
        id: ProductId,
        details: &ProductDetails,
        image: Option<&str>,
    ) -> Result<bool, RepositoryError> {
        self.check_writes()?;
        let mut rows = self.lock_rows();
        let Some(row) = rows.get_mut(&id) else {
            return Ok(false);
        };
        row.name.clone_from(&details.name);
        row.price = details.price;
        row.discount = details.discount;
        if let Some(image) = image {
            row.image = image.to_string();
        }
        Ok(true)
    }

    async fn delete_product(&self, id: ProductId) -> Result<Option<String>, RepositoryError> {
        Ok(self.lock_rows().remove(&id).map(|p| p.image))
    }

    async fn referenced_images(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.lock_rows().values().map(|p| p.image.clone()).collect())
    }
}
