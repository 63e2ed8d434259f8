//! Product repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;

use shop_core::{Amount, ProductId};

use super::{ProductStore, RepositoryError};
use crate::models::{Product, ProductDetails};

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    product_id: ProductId,
    name: String,
    image: String,
    price: Amount,
    discount: Amount,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            product_id: row.product_id,
            name: row.name,
            image: row.image,
            price: row.price,
            discount: row.discount,
        }
    }
}

/// Repository for the `products` table.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT product_id, name, image, price, discount
            FROM products
            ORDER BY product_id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn insert_product(
        &self,
        details: &ProductDetails,
        image: &str,
    ) -> Result<ProductId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ProductId>(
            r"
            INSERT INTO products (name, image, price, discount)
            VALUES ($1, $2, $3, $4)
            RETURNING product_id
            ",
        )
        .bind(&details.name)
        .bind(image)
        .bind(details.price)
        .bind(details.discount)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_product(
        &self,
        id: ProductId,
        details: &ProductDetails,
        image: Option<&str>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET name = $1,
                image = COALESCE($2, image),
                price = $3,
                discount = $4,
                updated_at = NOW()
            WHERE product_id = $5
            ",
        )
        .bind(&details.name)
        .bind(image)
        .bind(details.price)
        .bind(details.discount)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_product(&self, id: ProductId) -> Result<Option<String>, RepositoryError> {
        // One statement, so the returned image is the one the removed row held.
        let image = sqlx::query_scalar::<_, String>(
            "DELETE FROM products WHERE product_id = $1 RETURNING image",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    async fn referenced_images(&self) -> Result<Vec<String>, RepositoryError> {
        let images = sqlx::query_scalar::<_, String>("SELECT DISTINCT image FROM products")
            .fetch_all(&self.pool)
            .await?;

        Ok(images)
    }
}
