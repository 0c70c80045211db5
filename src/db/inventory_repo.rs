// src/db/inventory_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::InventoryStore,
    models::inventory::{Batch, BatchDetail, BatchStatus, NewProduct, Product, Section},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    // ---
    // Leitura
    // ---

    async fn list_active_batches(&self, user_id: Uuid) -> Result<Vec<BatchDetail>, AppError> {
        // A ordem por validade é o que garante o FIFO no painel.
        let batches = sqlx::query_as::<_, BatchDetail>(
            r#"
            SELECT
                b.id, b.product_id, b.quantity, b.expiration_date, b.status, b.created_at,
                p.name AS product_name,
                s.id AS section_id,
                s.name AS section_name
            FROM batches b
            JOIN products p ON p.id = b.product_id
            LEFT JOIN sections s ON s.id = p.section_id
            WHERE p.user_id = $1
              AND b.status = 'active'
            ORDER BY b.expiration_date ASC, b.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(batches)
    }

    async fn list_sections(&self, user_id: Uuid) -> Result<Vec<Section>, AppError> {
        let sections = sqlx::query_as::<_, Section>(
            "SELECT * FROM sections WHERE user_id = $1 ORDER BY name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sections)
    }

    async fn find_section(&self, user_id: Uuid, section_id: Uuid) -> Result<Option<Section>, AppError> {
        let section = sqlx::query_as::<_, Section>(
            "SELECT * FROM sections WHERE user_id = $1 AND id = $2",
        )
        .bind(user_id)
        .bind(section_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(section)
    }

    async fn list_products_by_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE user_id = $1 AND section_id = $2 ORDER BY name ASC",
        )
        .bind(user_id)
        .bind(section_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_section_by_name(&self, user_id: Uuid, name: &str) -> Result<Option<Section>, AppError> {
        // LIMIT 1: duplicatas são possíveis (sem UNIQUE), fica com a mais antiga.
        let section = sqlx::query_as::<_, Section>(
            r#"
            SELECT * FROM sections
            WHERE user_id = $1 AND lower(name) = lower($2)
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(section)
    }

    async fn find_product_by_name(
        &self,
        user_id: Uuid,
        section_id: Uuid,
        name: &str,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE user_id = $1 AND section_id = $2 AND lower(name) = lower($3)
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(section_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_batch(&self, user_id: Uuid, batch_id: Uuid) -> Result<Option<Batch>, AppError> {
        let batch = sqlx::query_as::<_, Batch>(
            r#"
            SELECT b.* FROM batches b
            JOIN products p ON p.id = b.product_id
            WHERE p.user_id = $1 AND b.id = $2
            "#,
        )
        .bind(user_id)
        .bind(batch_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(batch)
    }

    // ---
    // Escrita
    // ---

    async fn insert_section(&self, user_id: Uuid, name: &str) -> Result<Section, AppError> {
        let section = sqlx::query_as::<_, Section>(
            "INSERT INTO sections (user_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(section)
    }

    async fn insert_product(&self, user_id: Uuid, product: NewProduct) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (user_id, section_id, name, category, min_stock_alert)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(product.section_id)
        .bind(product.name)
        .bind(product.category)
        .bind(product.min_stock_alert)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn insert_batch(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        expiration_date: NaiveDate,
    ) -> Result<Batch, AppError> {
        // O SELECT garante que o produto é do usuário; sem linha = produto alheio ou inexistente.
        let batch = sqlx::query_as::<_, Batch>(
            r#"
            INSERT INTO batches (product_id, quantity, expiration_date, status)
            SELECT p.id, $3, $4, 'active'
            FROM products p
            WHERE p.id = $2 AND p.user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(expiration_date)
        .fetch_optional(&self.pool)
        .await?;

        batch.ok_or(AppError::ProductNotFound)
    }

    async fn update_batch_status(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
        status: BatchStatus,
    ) -> Result<Option<Batch>, AppError> {
        let batch = sqlx::query_as::<_, Batch>(
            r#"
            UPDATE batches b
            SET status = $3
            FROM products p
            WHERE p.id = b.product_id
              AND p.user_id = $1
              AND b.id = $2
              AND b.status = 'active'
            RETURNING b.*
            "#,
        )
        .bind(user_id)
        .bind(batch_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(batch)
    }

    async fn delete_product(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, AppError> {
        // Os lotes saem junto (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND user_id = $2")
            .bind(product_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
