// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,

        // --- Batches / Products ---
        handlers::batches::list_batches,
        handlers::batches::create_batch,
        handlers::batches::update_batch_status,
        handlers::batches::quick_add_batch,
        handlers::batches::delete_product,
        handlers::batches::list_sections,
        handlers::batches::list_section_products,

        // --- Import ---
        handlers::import::preview_import,
        handlers::import::import_products,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Inventory ---
            models::inventory::Section,
            models::inventory::Product,
            models::inventory::Batch,
            models::inventory::BatchStatus,
            models::inventory::BatchDetail,

            // --- Dashboard ---
            models::dashboard::Dashboard,
            models::dashboard::SectionGroup,
            models::dashboard::ProductGroup,
            models::dashboard::BatchView,

            // --- Import ---
            models::import::ImportRow,
            models::import::ImportSummary,

            // --- Payloads ---
            handlers::batches::CreateBatchPayload,
            handlers::batches::UpdateBatchStatusPayload,
            handlers::batches::QuickAddPayload,
            handlers::import::ImportPayload,
            handlers::import::ImportPreview,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Dashboard", description = "Painel de validades e alertas críticos"),
        (name = "Batches", description = "Registro e baixa de lotes"),
        (name = "Products", description = "Produtos e sessões (autocomplete)"),
        (name = "Import", description = "Importação em massa via planilha")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
