// src/db/memory_store.rs

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::InventoryStore,
    models::inventory::{Batch, BatchDetail, BatchStatus, NewProduct, Product, Section},
};

#[derive(Default)]
struct Tables {
    sections: Vec<Section>,
    products: Vec<Product>,
    batches: Vec<Batch>,
}

/// Implementação em memória do `InventoryStore`, usada nos testes dos serviços.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantas chamadas o store recebeu até agora.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn section_count(&self) -> usize {
        self.tables.lock().unwrap().sections.len()
    }

    pub fn product_count(&self) -> usize {
        self.tables.lock().unwrap().products.len()
    }

    /// Todos os lotes, inclusive os baixados.
    pub fn all_batches(&self) -> Vec<Batch> {
        self.tables.lock().unwrap().batches.clone()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    // Timestamps crescentes para que "mais antigo primeiro" seja determinístico.
    fn stamp(tables: &Tables) -> chrono::DateTime<Utc> {
        let n = tables.sections.len() + tables.products.len() + tables.batches.len();
        Utc::now() + Duration::milliseconds(n as i64)
    }

    fn owns_product(tables: &Tables, user_id: Uuid, product_id: Uuid) -> bool {
        tables.products.iter().any(|p| p.id == product_id && p.user_id == user_id)
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn list_active_batches(&self, user_id: Uuid) -> Result<Vec<BatchDetail>, AppError> {
        self.touch();
        let tables = self.tables.lock().unwrap();

        let mut details: Vec<BatchDetail> = tables
            .batches
            .iter()
            .filter(|b| b.status == BatchStatus::Active)
            .filter_map(|b| {
                let product = tables
                    .products
                    .iter()
                    .find(|p| p.id == b.product_id && p.user_id == user_id)?;
                let section = product
                    .section_id
                    .and_then(|sid| tables.sections.iter().find(|s| s.id == sid));
                Some(BatchDetail {
                    id: b.id,
                    product_id: b.product_id,
                    quantity: b.quantity,
                    expiration_date: b.expiration_date,
                    status: b.status,
                    created_at: b.created_at,
                    product_name: product.name.clone(),
                    section_id: section.map(|s| s.id),
                    section_name: section.map(|s| s.name.clone()),
                })
            })
            .collect();

        details.sort_by_key(|d| (d.expiration_date, d.created_at));
        Ok(details)
    }

    async fn list_sections(&self, user_id: Uuid) -> Result<Vec<Section>, AppError> {
        self.touch();
        let tables = self.tables.lock().unwrap();
        let mut sections: Vec<Section> =
            tables.sections.iter().filter(|s| s.user_id == user_id).cloned().collect();
        sections.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sections)
    }

    async fn find_section(&self, user_id: Uuid, section_id: Uuid) -> Result<Option<Section>, AppError> {
        self.touch();
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .sections
            .iter()
            .find(|s| s.user_id == user_id && s.id == section_id)
            .cloned())
    }

    async fn list_products_by_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
    ) -> Result<Vec<Product>, AppError> {
        self.touch();
        let tables = self.tables.lock().unwrap();
        let mut products: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| p.user_id == user_id && p.section_id == Some(section_id))
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn find_section_by_name(&self, user_id: Uuid, name: &str) -> Result<Option<Section>, AppError> {
        self.touch();
        let tables = self.tables.lock().unwrap();
        let wanted = name.to_lowercase();
        Ok(tables
            .sections
            .iter()
            .find(|s| s.user_id == user_id && s.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn insert_section(&self, user_id: Uuid, name: &str) -> Result<Section, AppError> {
        self.touch();
        let mut tables = self.tables.lock().unwrap();
        let section = Section {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            created_at: Self::stamp(&tables),
        };
        tables.sections.push(section.clone());
        Ok(section)
    }

    async fn find_product_by_name(
        &self,
        user_id: Uuid,
        section_id: Uuid,
        name: &str,
    ) -> Result<Option<Product>, AppError> {
        self.touch();
        let tables = self.tables.lock().unwrap();
        let wanted = name.to_lowercase();
        Ok(tables
            .products
            .iter()
            .find(|p| {
                p.user_id == user_id
                    && p.section_id == Some(section_id)
                    && p.name.to_lowercase() == wanted
            })
            .cloned())
    }

    async fn insert_product(&self, user_id: Uuid, product: NewProduct) -> Result<Product, AppError> {
        self.touch();
        let mut tables = self.tables.lock().unwrap();
        let product = Product {
            id: Uuid::new_v4(),
            user_id,
            section_id: product.section_id,
            name: product.name,
            category: product.category,
            image_url: None,
            min_stock_alert: Some(product.min_stock_alert),
            created_at: Self::stamp(&tables),
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn insert_batch(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        expiration_date: NaiveDate,
    ) -> Result<Batch, AppError> {
        self.touch();
        let mut tables = self.tables.lock().unwrap();
        if !Self::owns_product(&tables, user_id, product_id) {
            return Err(AppError::ProductNotFound);
        }
        let batch = Batch {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            expiration_date,
            status: BatchStatus::Active,
            created_at: Self::stamp(&tables),
        };
        tables.batches.push(batch.clone());
        Ok(batch)
    }

    async fn find_batch(&self, user_id: Uuid, batch_id: Uuid) -> Result<Option<Batch>, AppError> {
        self.touch();
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .batches
            .iter()
            .find(|b| b.id == batch_id && Self::owns_product(&tables, user_id, b.product_id))
            .cloned())
    }

    async fn update_batch_status(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
        status: BatchStatus,
    ) -> Result<Option<Batch>, AppError> {
        self.touch();
        let mut tables = self.tables.lock().unwrap();
        let position = tables.batches.iter().position(|b| {
            b.id == batch_id
                && b.status == BatchStatus::Active
                && Self::owns_product(&tables, user_id, b.product_id)
        });

        Ok(position.map(|i| {
            tables.batches[i].status = status;
            tables.batches[i].clone()
        }))
    }

    async fn delete_product(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, AppError> {
        self.touch();
        let mut tables = self.tables.lock().unwrap();
        if !Self::owns_product(&tables, user_id, product_id) {
            return Ok(false);
        }
        tables.products.retain(|p| p.id != product_id);
        tables.batches.retain(|b| b.product_id != product_id);
        Ok(true)
    }
}
