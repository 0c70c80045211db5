// src/handlers/batches.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, json::AppJson},
    models::inventory::{Batch, BatchDetail, BatchStatus, Product, Section},
    services::batch_service::NewBatch,
};

// ---
// Payload: CreateBatch (formulário "Novo Item")
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchPayload {
    #[validate(length(min = 1, message = "A sessão é obrigatória."))]
    pub section: String,

    #[validate(length(min = 1, message = "O produto é obrigatório."))]
    pub product: String,

    #[validate(
        required(message = "A quantidade é obrigatória."),
        range(min = 1, message = "A quantidade deve ser maior que zero.")
    )]
    pub quantity: Option<i32>,

    #[validate(required(message = "A data de validade é obrigatória."))]
    pub expiration_date: Option<NaiveDate>, // Formato YYYY-MM-DD
}

// GET /api/batches
#[utoipa::path(
    get,
    path = "/api/batches",
    tag = "Batches",
    responses(
        (status = 200, description = "Lotes ativos em ordem de validade (FIFO)", body = Vec<BatchDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_batches(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let batches = app_state
        .batch_service
        .list_active_batches(user.id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(batches)))
}

// POST /api/batches
#[utoipa::path(
    post,
    path = "/api/batches",
    tag = "Batches",
    request_body = CreateBatchPayload,
    responses(
        (status = 201, description = "Lote registrado (sessão e produto criados se preciso)", body = Batch),
        (status = 400, description = "Campos obrigatórios ausentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_batch(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<CreateBatchPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let batch = app_state
        .batch_service
        .create_batch(
            user.id,
            NewBatch {
                section_name: payload.section,
                product_name: payload.product,
                quantity: payload.quantity,
                expiration_date: payload.expiration_date,
            },
        )
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(batch)))
}

// ---
// Payload: baixa de lote
// ---
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBatchStatusPayload {
    pub status: BatchStatus, // "consumed" ou "discarded"
}

// PATCH /api/batches/{id}/status
#[utoipa::path(
    patch,
    path = "/api/batches/{id}/status",
    tag = "Batches",
    request_body = UpdateBatchStatusPayload,
    params(("id" = Uuid, Path, description = "ID do lote")),
    responses(
        (status = 200, description = "Lote baixado", body = Batch),
        (status = 404, description = "Lote não encontrado"),
        (status = 409, description = "Lote já baixado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_batch_status(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(batch_id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateBatchStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let batch = app_state
        .batch_service
        .set_batch_status(user.id, batch_id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(batch)))
}

// ---
// Payload: QuickAdd (botão "+" no card do produto)
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickAddPayload {
    pub quantity: Option<i32>,
    pub expiration_date: Option<NaiveDate>,
}

// POST /api/products/{id}/batches
#[utoipa::path(
    post,
    path = "/api/products/{id}/batches",
    tag = "Batches",
    request_body = QuickAddPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 201, description = "Lote adicionado ao produto", body = Batch),
        (status = 400, description = "Quantidade zero ou validade ausente"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn quick_add_batch(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(product_id): Path<Uuid>,
    AppJson(payload): AppJson<QuickAddPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let batch = app_state
        .batch_service
        .quick_add(user.id, product_id, payload.quantity, payload.expiration_date)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(batch)))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto e lotes removidos"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .batch_service
        .delete_product(user.id, product_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Autocomplete do formulário
// ---

// GET /api/sections
#[utoipa::path(
    get,
    path = "/api/sections",
    tag = "Products",
    responses((status = 200, description = "Sessões do usuário em ordem alfabética", body = Vec<Section>)),
    security(("api_jwt" = []))
)]
pub async fn list_sections(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let sections = app_state
        .batch_service
        .list_sections(user.id)
        .await
        .map_err(|e| {
            tracing::warn!("Falha ao carregar sessões para o autocomplete: {}", e);
            e.to_api_error(&locale)
        })?;

    Ok((StatusCode::OK, Json(sections)))
}

// GET /api/sections/{id}/products
#[utoipa::path(
    get,
    path = "/api/sections/{id}/products",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID da sessão")),
    responses(
        (status = 200, description = "Produtos da sessão em ordem alfabética", body = Vec<Product>),
        (status = 404, description = "Sessão não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_section_products(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(section_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .batch_service
        .list_products_by_section(user.id, section_id)
        .await
        .map_err(|e| {
            tracing::warn!("Falha ao carregar produtos da sessão {}: {}", section_id, e);
            e.to_api_error(&locale)
        })?;

    Ok((StatusCode::OK, Json(products)))
}
