// src/services/batch_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::InventoryStore,
    models::{
        import::{ImportRow, ImportSummary},
        inventory::{
            Batch, BatchDetail, BatchStatus, NewProduct, Product, Section, DEFAULT_MIN_STOCK_ALERT,
        },
    },
    services::import::normalize_name,
};

/// Cadastro de um lote pelo formulário (sessão e produto em texto livre).
#[derive(Debug, Clone)]
pub struct NewBatch {
    pub section_name: String,
    pub product_name: String,
    pub quantity: Option<i32>,
    pub expiration_date: Option<NaiveDate>,
}

/// Resultado de um "busca ou cria".
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub created: bool,
}

#[derive(Clone)]
pub struct BatchService {
    store: Arc<dyn InventoryStore>,
}

impl BatchService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    // ---
    // Leitura
    // ---

    pub async fn list_active_batches(&self, user_id: Uuid) -> Result<Vec<BatchDetail>, AppError> {
        self.store.list_active_batches(user_id).await
    }

    pub async fn list_sections(&self, user_id: Uuid) -> Result<Vec<Section>, AppError> {
        self.store.list_sections(user_id).await
    }

    pub async fn list_products_by_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
    ) -> Result<Vec<Product>, AppError> {
        self.store
            .find_section(user_id, section_id)
            .await?
            .ok_or(AppError::SectionNotFound)?;

        self.store.list_products_by_section(user_id, section_id).await
    }

    // ---
    // Busca ou cria (não atômico: dois cadastros simultâneos podem duplicar)
    // ---

    pub async fn resolve_section(&self, user_id: Uuid, name: &str) -> Result<Resolved<Section>, AppError> {
        let name = normalize_name(name);

        if let Some(section) = self.store.find_section_by_name(user_id, &name).await? {
            return Ok(Resolved { value: section, created: false });
        }

        let section = self.store.insert_section(user_id, &name).await?;
        tracing::info!("Sessão criada: {} ({})", section.name, section.id);
        Ok(Resolved { value: section, created: true })
    }

    pub async fn resolve_product(
        &self,
        user_id: Uuid,
        section: &Section,
        name: &str,
    ) -> Result<Resolved<Product>, AppError> {
        let name = normalize_name(name);

        if let Some(product) = self.store.find_product_by_name(user_id, section.id, &name).await? {
            return Ok(Resolved { value: product, created: false });
        }

        let product = self
            .store
            .insert_product(
                user_id,
                NewProduct {
                    section_id: Some(section.id),
                    name,
                    category: Some(section.name.clone()),
                    min_stock_alert: DEFAULT_MIN_STOCK_ALERT,
                },
            )
            .await?;
        tracing::info!("Produto criado: {} em {} ({})", product.name, section.name, product.id);
        Ok(Resolved { value: product, created: true })
    }

    // ---
    // Lotes
    // ---

    /// Sessão -> produto -> lote, nessa ordem. Se o lote falhar, a sessão e o
    /// produto criados nos passos anteriores permanecem.
    pub async fn create_batch(&self, user_id: Uuid, input: NewBatch) -> Result<Batch, AppError> {
        let mut errors = ValidationErrors::new();
        if input.section_name.trim().is_empty() {
            errors.add("section", field_error("required", "A sessão é obrigatória."));
        }
        if input.product_name.trim().is_empty() {
            errors.add("product", field_error("required", "O produto é obrigatório."));
        }
        let checked = check_quantity_and_date(input.quantity, input.expiration_date, &mut errors);
        let (quantity, expiration_date) = match checked {
            Some(values) if errors.is_empty() => values,
            _ => return Err(AppError::ValidationError(errors)),
        };

        let section = self.resolve_section(user_id, &input.section_name).await?.value;
        let product = self.resolve_product(user_id, &section, &input.product_name).await?.value;

        let batch = self
            .store
            .insert_batch(user_id, product.id, quantity, expiration_date)
            .await?;
        tracing::info!("Lote registrado: {} x{} vence {}", product.name, quantity, expiration_date);
        Ok(batch)
    }

    /// Novo lote para um produto existente (botão "+" do painel).
    pub async fn quick_add(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: Option<i32>,
        expiration_date: Option<NaiveDate>,
    ) -> Result<Batch, AppError> {
        let mut errors = ValidationErrors::new();
        let Some((quantity, expiration_date)) =
            check_quantity_and_date(quantity, expiration_date, &mut errors)
        else {
            return Err(AppError::ValidationError(errors));
        };

        self.store
            .insert_batch(user_id, product_id, quantity, expiration_date)
            .await
    }

    /// Baixa um lote ativo como consumido ou descartado. A linha não é apagada.
    pub async fn set_batch_status(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
        status: BatchStatus,
    ) -> Result<Batch, AppError> {
        if !status.is_terminal() {
            return Err(AppError::InvalidStatusTransition);
        }

        if let Some(batch) = self.store.update_batch_status(user_id, batch_id, status).await? {
            tracing::info!("Lote {} marcado como {:?}", batch.id, status);
            return Ok(batch);
        }

        // Nada mudou: ou o lote não existe, ou já foi baixado
        match self.store.find_batch(user_id, batch_id).await? {
            Some(_) => Err(AppError::BatchNotActive),
            None => Err(AppError::BatchNotFound),
        }
    }

    /// Apaga o produto e todos os seus lotes.
    pub async fn delete_product(&self, user_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_product(user_id, product_id).await? {
            return Err(AppError::ProductNotFound);
        }
        tracing::info!("Produto {} removido com seus lotes", product_id);
        Ok(())
    }

    // ---
    // Importação
    // ---

    /// Cadastra sessões e produtos linha a linha, em sequência. Não cria lotes.
    /// Uma falha no meio interrompe a importação; o que já foi criado fica.
    pub async fn import_products(&self, user_id: Uuid, rows: &[ImportRow]) -> Result<ImportSummary, AppError> {
        if rows.is_empty() {
            return Err(AppError::EmptyImport);
        }

        let mut summary = ImportSummary { rows: rows.len(), ..ImportSummary::default() };

        for row in rows {
            let section = self.resolve_section(user_id, &row.section).await?;
            if section.created {
                summary.sections_created += 1;
            }

            let product = self.resolve_product(user_id, &section.value, &row.product).await?;
            if product.created {
                summary.products_created += 1;
            }
        }

        tracing::info!(
            "Importação concluída: {} linhas, {} sessões e {} produtos novos",
            summary.rows,
            summary.sections_created,
            summary.products_created
        );
        Ok(summary)
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

// Quantidade > 0 e validade presente; antes de qualquer chamada ao banco.
fn check_quantity_and_date(
    quantity: Option<i32>,
    expiration_date: Option<NaiveDate>,
    errors: &mut ValidationErrors,
) -> Option<(i32, NaiveDate)> {
    let quantity = match quantity {
        Some(q) if q > 0 => Some(q),
        _ => {
            errors.add("quantity", field_error("range", "A quantidade deve ser maior que zero."));
            None
        }
    };

    if expiration_date.is_none() {
        errors.add("expirationDate", field_error("required", "A data de validade é obrigatória."));
    }

    Some((quantity?, expiration_date?))
}
