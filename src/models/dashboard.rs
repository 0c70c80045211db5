// src/models/dashboard.rs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::inventory::BatchStatus;

// 1. Um lote pronto para exibição
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub section_name: String,
    pub quantity: i32,
    pub expiration_date: NaiveDate,
    pub display_date: String, // ex: "12/OUT"
    pub days_remaining: i64,
    pub critical: bool,
    pub expired: bool,
    pub status: BatchStatus,
}

// 2. Lotes de um produto, em ordem FIFO
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    pub product_id: Uuid,
    pub product_name: String,
    pub total_quantity: i64,
    pub batch_count: usize,
    pub batches: Vec<BatchView>,
}

// 3. Produtos de uma sessão
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionGroup {
    pub section_name: String,
    pub product_count: usize,
    pub products: Vec<ProductGroup>,
}

// 4. O painel inteiro (alertas críticos no topo + sessões)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub critical_count: usize,
    pub total_products: usize,
    pub critical: Vec<BatchView>,
    pub sections: Vec<SectionGroup>,
}
