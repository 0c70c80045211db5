// src/services/dashboard_service.rs

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::{dates, error::AppError},
    db::InventoryStore,
    models::{
        dashboard::{BatchView, Dashboard, ProductGroup, SectionGroup},
        inventory::BatchDetail,
    },
};

/// Nome usado para produtos sem sessão.
pub const NO_SECTION: &str = "SEM SESSÃO";

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn InventoryStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub async fn get_dashboard(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<Dashboard, AppError> {
        let batches = self.store.list_active_batches(user_id).await?;
        Ok(build_dashboard(&batches, now))
    }
}

pub fn batch_view(batch: &BatchDetail, now: DateTime<Utc>) -> BatchView {
    let days_remaining = dates::days_remaining_at(batch.expiration_date, now);
    BatchView {
        id: batch.id,
        product_id: batch.product_id,
        product_name: batch.product_name.clone(),
        section_name: batch.section_name.clone().unwrap_or_else(|| NO_SECTION.to_string()),
        quantity: batch.quantity,
        expiration_date: batch.expiration_date,
        display_date: dates::format_display_date(batch.expiration_date),
        days_remaining,
        critical: dates::is_critical(days_remaining),
        expired: dates::is_expired(days_remaining),
        status: batch.status,
    }
}

/// Monta o painel a partir dos lotes ativos.
///
/// `batches` precisa vir em ordem de validade ascendente: os lotes são apenas
/// anexados ao grupo do produto, nessa ordem, sem reordenar.
pub fn build_dashboard(batches: &[BatchDetail], now: DateTime<Utc>) -> Dashboard {
    let views: Vec<BatchView> = batches.iter().map(|b| batch_view(b, now)).collect();

    let critical: Vec<BatchView> = views.iter().filter(|v| v.critical).cloned().collect();
    let total_products = views.iter().map(|v| v.product_id).collect::<HashSet<_>>().len();

    // BTreeMap: sessões em ordem alfabética
    let mut by_section: BTreeMap<String, Vec<ProductGroup>> = BTreeMap::new();
    for view in views {
        let products = by_section.entry(view.section_name.clone()).or_default();
        match products.iter_mut().find(|g| g.product_id == view.product_id) {
            Some(group) => {
                group.total_quantity += i64::from(view.quantity);
                group.batch_count += 1;
                group.batches.push(view);
            }
            None => products.push(ProductGroup {
                product_id: view.product_id,
                product_name: view.product_name.clone(),
                total_quantity: i64::from(view.quantity),
                batch_count: 1,
                batches: vec![view],
            }),
        }
    }

    let sections = by_section
        .into_iter()
        .map(|(section_name, products)| SectionGroup {
            section_name,
            product_count: products.len(),
            products,
        })
        .collect();

    Dashboard {
        critical_count: critical.len(),
        total_products,
        critical,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::BatchStatus;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
    }

    fn detail(product: (Uuid, &str), section: Option<&str>, qty: i32, day: u32) -> BatchDetail {
        BatchDetail {
            id: Uuid::new_v4(),
            product_id: product.0,
            quantity: qty,
            expiration_date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            status: BatchStatus::Active,
            created_at: now(),
            product_name: product.1.to_string(),
            section_id: None,
            section_name: section.map(str::to_string),
        }
    }

    #[test]
    fn groups_by_section_then_product_keeping_fifo_order() {
        let milk = (Uuid::new_v4(), "LEITE");
        let bread = (Uuid::new_v4(), "PÃO");
        let cheese = (Uuid::new_v4(), "QUEIJO");

        // Já em ordem de validade, como vem do banco
        let batches = vec![
            detail(bread, Some("PADARIA"), 2, 17),
            detail(milk, Some("LATICINIOS"), 6, 18),
            detail(cheese, Some("LATICINIOS"), 1, 20),
            detail(milk, Some("LATICINIOS"), 12, 25),
            detail(bread, Some("PADARIA"), 4, 28),
        ];

        let dashboard = build_dashboard(&batches, now());

        let names: Vec<&str> = dashboard.sections.iter().map(|s| s.section_name.as_str()).collect();
        assert_eq!(names, ["LATICINIOS", "PADARIA"]);

        let dairy = &dashboard.sections[0];
        assert_eq!(dairy.product_count, 2);
        assert_eq!(dairy.products[0].product_name, "LEITE");
        assert_eq!(dairy.products[0].total_quantity, 18);
        assert_eq!(dairy.products[0].batch_count, 2);

        let milk_dates: Vec<u32> = dairy.products[0]
            .batches
            .iter()
            .map(|b| chrono::Datelike::day(&b.expiration_date))
            .collect();
        assert_eq!(milk_dates, [18, 25]);

        let bakery = &dashboard.sections[1];
        let bread_dates: Vec<u32> = bakery.products[0]
            .batches
            .iter()
            .map(|b| chrono::Datelike::day(&b.expiration_date))
            .collect();
        assert_eq!(bread_dates, [17, 28]);

        assert_eq!(dashboard.total_products, 3);
    }

    #[test]
    fn critical_list_uses_three_day_threshold() {
        let p = (Uuid::new_v4(), "IOGURTE");
        let batches = vec![
            detail(p, Some("LATICINIOS"), 1, 14), // vencido
            detail(p, Some("LATICINIOS"), 1, 19), // 3 dias
            detail(p, Some("LATICINIOS"), 1, 20), // 4 dias
        ];

        let dashboard = build_dashboard(&batches, now());

        assert_eq!(dashboard.critical_count, 2);
        let days: Vec<i64> = dashboard.critical.iter().map(|b| b.days_remaining).collect();
        assert_eq!(days, [-2, 3]);
        assert!(dashboard.critical[0].expired);

        // Vencidos continuam no painel
        assert_eq!(dashboard.sections[0].products[0].batch_count, 3);
    }

    #[test]
    fn products_without_section_fall_into_placeholder() {
        let p = (Uuid::new_v4(), "AVULSO");
        let dashboard = build_dashboard(&[detail(p, None, 3, 30)], now());
        assert_eq!(dashboard.sections[0].section_name, NO_SECTION);
        assert_eq!(dashboard.sections[0].products[0].batches[0].display_date, "30/OUT");
    }

    #[test]
    fn empty_input_gives_empty_dashboard() {
        let dashboard = build_dashboard(&[], now());
        assert_eq!(dashboard.critical_count, 0);
        assert_eq!(dashboard.total_products, 0);
        assert!(dashboard.sections.is_empty());
    }
}
