// src/services/import.rs
//
// Importação em massa: texto colado do Excel / Google Sheets, uma linha por
// registro, colunas separadas por TAB (SESSÃO | PRODUTO).

use crate::{common::error::AppError, models::import::ImportRow};

/// Normaliza nomes de sessão e produto: sem espaços nas pontas e em maiúsculas.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Lê o texto colado e devolve as linhas válidas, ou o erro da primeira linha inválida.
///
/// Linhas em branco são ignoradas e não entram na numeração. Colunas além da
/// segunda são descartadas.
pub fn parse_import(text: &str) -> Result<Vec<ImportRow>, AppError> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| parse_line(index + 1, line))
        .collect()
}

fn parse_line(line: usize, raw: &str) -> Result<ImportRow, AppError> {
    let mut columns = raw.split('\t');

    let (Some(section), Some(product)) = (columns.next(), columns.next()) else {
        return Err(AppError::ImportLineFormat { line });
    };

    let section = normalize_name(section);
    let product = normalize_name(product);
    if section.is_empty() || product.is_empty() {
        return Err(AppError::ImportLineEmpty { line });
    }

    Ok(ImportRow { section, product })
}
