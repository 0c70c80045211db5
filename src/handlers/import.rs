// src/handlers/import.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, json::AppJson},
    models::import::{ImportRow, ImportSummary},
    services::import::parse_import,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImportPayload {
    /// Texto colado da planilha: SESSÃO<TAB>PRODUTO por linha.
    #[validate(length(min = 1, message = "Cole os dados da planilha."))]
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportPreview {
    pub count: usize,
    pub rows: Vec<ImportRow>,
}

// POST /api/import/preview
#[utoipa::path(
    post,
    path = "/api/import/preview",
    tag = "Import",
    request_body = ImportPayload,
    responses(
        (status = 200, description = "Linhas reconhecidas, já normalizadas", body = ImportPreview),
        (status = 400, description = "Linha inválida (com o número da linha)")
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_import(
    locale: Locale,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<ImportPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let rows = parse_import(&payload.text).map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(ImportPreview { count: rows.len(), rows })))
}

// POST /api/import
#[utoipa::path(
    post,
    path = "/api/import",
    tag = "Import",
    request_body = ImportPayload,
    responses(
        (status = 200, description = "Sessões e produtos cadastrados", body = ImportSummary),
        (status = 400, description = "Linha inválida ou nada para importar")
    ),
    security(("api_jwt" = []))
)]
pub async fn import_products(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<ImportPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    // Valida tudo antes de gravar qualquer linha
    let rows = parse_import(&payload.text).map_err(|e| e.to_api_error(&locale))?;

    let summary = app_state
        .batch_service
        .import_products(user.id, &rows)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(summary)))
}
