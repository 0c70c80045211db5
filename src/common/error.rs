use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::middleware::i18n::Locale;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Linha {line} inválida: use o formato SESSÃO | PRODUTO")]
    ImportLineFormat { line: usize },

    #[error("Linha {line}: Sessão ou Produto vazios")]
    ImportLineEmpty { line: usize },

    #[error("Nenhuma linha para importar")]
    EmptyImport,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Sessão não encontrada")]
    SectionNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Lote não encontrado")]
    BatchNotFound,

    #[error("O lote já foi baixado")]
    BatchNotActive,

    #[error("Status de destino inválido")]
    InvalidStatusTransition,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// O erro que de fato vai para o cliente, já traduzido.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    fn simple(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, error: error.into(), details: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidBody(_)
            | AppError::ImportLineFormat { .. }
            | AppError::ImportLineEmpty { .. }
            | AppError::EmptyImport
            | AppError::InvalidStatusTransition => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists | AppError::BatchNotActive => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound
            | AppError::SectionNotFound
            | AppError::ProductNotFound
            | AppError::BatchNotFound => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte para a resposta do cliente no idioma pedido.
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let en = locale.is_english();
        let status = self.status();

        let message = match &self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let error = if en {
                    "One or more fields are invalid."
                } else {
                    "Um ou mais campos são inválidos."
                };
                return ApiError {
                    status,
                    error: error.into(),
                    details: Some(json!(details)),
                };
            }
            AppError::InvalidBody(rejection) => {
                // O texto do serde (campo e posição) vai em details; a mensagem é traduzida.
                let error = if en {
                    "The request body is invalid."
                } else {
                    "O corpo da requisição é inválido."
                };
                return ApiError {
                    status,
                    error: error.into(),
                    details: Some(json!({ "body": [rejection.body_text()] })),
                };
            }
            AppError::ImportLineFormat { line } => {
                if en {
                    format!("Line {line} is invalid: use the format SECTION | PRODUCT (tab-separated).")
                } else {
                    format!("Linha {line} inválida: use o formato SESSÃO | PRODUTO (separados por TAB).")
                }
            }
            AppError::ImportLineEmpty { line } => {
                if en {
                    format!("Line {line}: section or product is empty.")
                } else {
                    format!("Linha {line}: Sessão ou Produto vazios.")
                }
            }
            AppError::EmptyImport => pick(en, "Nothing to import.", "Nenhuma linha para importar."),
            AppError::EmailAlreadyExists => pick(en, "This e-mail is already in use.", "Este e-mail já está em uso."),
            AppError::InvalidCredentials => pick(en, "Invalid e-mail or password.", "E-mail ou senha inválidos."),
            AppError::InvalidToken => pick(
                en,
                "Missing or invalid authentication token.",
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::UserNotFound => pick(en, "User not found.", "Usuário não encontrado."),
            AppError::SectionNotFound => pick(en, "Section not found.", "Sessão não encontrada."),
            AppError::ProductNotFound => pick(en, "Product not found.", "Produto não encontrado."),
            AppError::BatchNotFound => pick(en, "Batch not found.", "Lote não encontrado."),
            AppError::BatchNotActive => pick(
                en,
                "This batch was already consumed or discarded.",
                "Este lote já foi consumido ou descartado.",
            ),
            AppError::InvalidStatusTransition => pick(
                en,
                "A batch can only be marked as consumed or discarded.",
                "Um lote só pode ser marcado como consumido ou descartado.",
            ),
            // Banco, rede, hashing, JWT: loga o detalhe e devolve mensagem genérica.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                pick(
                    en,
                    "Error loading or saving data. Please try again.",
                    "Erro ao carregar ou salvar dados. Tente novamente.",
                )
            }
        };

        ApiError::simple(status, message)
    }
}

fn pick(en: bool, english: &str, portuguese: &str) -> String {
    let message = if en { english } else { portuguese };
    message.to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}
