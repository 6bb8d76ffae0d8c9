//! Dashboard: record counts, total sales and the average invoice.

use serde::Serialize;
use tracing::info;

use nimbus_core::DashboardStats;
use nimbus_db::Collection;

use super::Context;
use crate::error::AppError;
use crate::render;

#[derive(Debug, Serialize)]
struct DashboardView<'a> {
    company_name: &'a str,
    #[serde(flatten)]
    stats: DashboardStats,
}

pub async fn stats(ctx: &Context) -> Result<DashboardStats, AppError> {
    let employees = ctx.db.count(Collection::Employees).await?;
    let products = ctx.db.count(Collection::Products).await?;
    let sales = ctx.db.invoices().sales_summary().await?;

    let stats = DashboardStats::compute(employees, products, sales);
    info!(
        employees = stats.employee_count,
        products = stats.product_count,
        invoices = stats.invoice_count,
        "Dashboard loaded"
    );
    Ok(stats)
}

pub async fn show(ctx: &Context) -> Result<String, AppError> {
    let stats = stats(ctx).await?;
    if ctx.is_json() {
        render::to_json(&DashboardView {
            company_name: &ctx.config.company_name,
            stats,
        })
    } else {
        Ok(render::dashboard(&stats, &ctx.config))
    }
}
