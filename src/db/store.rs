// src/db/store.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Batch, BatchDetail, BatchStatus, NewProduct, Product, Section},
};

/// Acesso a sessões, produtos e lotes de um usuário.
///
/// Toda chamada recebe o `user_id` do dono; nada de um usuário é visível ao outro.
/// As buscas por nome são case-insensitive e exatas.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Lotes ativos com produto e sessão, validade ascendente.
    async fn list_active_batches(&self, user_id: Uuid) -> Result<Vec<BatchDetail>, AppError>;

    async fn list_sections(&self, user_id: Uuid) -> Result<Vec<Section>, AppError>;

    async fn find_section(&self, user_id: Uuid, section_id: Uuid) -> Result<Option<Section>, AppError>;

    async fn list_products_by_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
    ) -> Result<Vec<Product>, AppError>;

    async fn find_section_by_name(&self, user_id: Uuid, name: &str) -> Result<Option<Section>, AppError>;

    async fn insert_section(&self, user_id: Uuid, name: &str) -> Result<Section, AppError>;

    async fn find_product_by_name(
        &self,
        user_id: Uuid,
        section_id: Uuid,
        name: &str,
    ) -> Result<Option<Product>, AppError>;

    async fn insert_product(&self, user_id: Uuid, product: NewProduct) -> Result<Product, AppError>;

    /// Falha com `ProductNotFound` se o produto não for do usuário.
    async fn insert_batch(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        expiration_date: NaiveDate,
    ) -> Result<Batch, AppError>;

    async fn find_batch(&self, user_id: Uuid, batch_id: Uuid) -> Result<Option<Batch>, AppError>;

    /// Só altera lotes ainda ativos; `None` quando nada mudou.
    async fn update_batch_status(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
        status: BatchStatus,
    ) -> Result<Option<Batch>, AppError>;

    /// Remove o produto e, em cascata, todos os seus lotes.
    async fn delete_product(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, AppError>;
}
