// src/models/import.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uma linha válida da planilha colada: SESSÃO | PRODUTO (já normalizados).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportRow {
    pub section: String,
    pub product: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub rows: usize,
    pub sections_created: usize,
    pub products_created: usize,
}
