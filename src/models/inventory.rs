// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Alerta de estoque mínimo usado quando um produto nasce implicitamente.
pub const DEFAULT_MIN_STOCK_ALERT: i32 = 5;

// --- 1. Sessões (corredores / áreas de armazenamento) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// --- 2. Produtos ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub user_id: Uuid,
    pub section_id: Option<Uuid>,
    pub name: String,
    // Espelho legado do nome da sessão
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub min_stock_alert: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Dados para inserir um produto novo (o dono vem separado).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub section_id: Option<Uuid>,
    pub name: String,
    pub category: Option<String>,
    pub min_stock_alert: i32,
}

// --- 3. Lotes ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "batch_status", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum BatchStatus {
    Active,
    Consumed,
    Discarded,
}

impl BatchStatus {
    /// Consumido e descartado são finais: o lote sai do estoque mas a linha fica.
    pub fn is_terminal(self) -> bool {
        matches!(self, BatchStatus::Consumed | BatchStatus::Discarded)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub expiration_date: NaiveDate,
    pub status: BatchStatus,
    pub created_at: DateTime<Utc>,
}

/// Lote com os dados do produto e da sessão (JOIN).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchDetail {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub expiration_date: NaiveDate,
    pub status: BatchStatus,
    pub created_at: DateTime<Utc>,
    pub product_name: String,
    pub section_id: Option<Uuid>,
    pub section_name: Option<String>,
}
