//! # Invoice Commands
//!
//! ## Create Flow
//! ```text
//! --item PRODUCT_ID:QTY[:TAX[:DISCOUNT]] (repeated)
//!        │
//!        ▼
//! look up each product ──── missing → NotFound
//!        │
//!        ▼
//! InvoiceDraft: select product (price, 10 % tax), quantity,
//!               then any explicit tax / discount
//!        │
//!        ▼
//! into_new_invoice()  (validation + totals)
//!        │
//!        ▼
//! InvoiceRepository::create  (one transaction)
//! ```

use chrono::Local;
use tracing::{debug, info};

use nimbus_core::{parse_record_id, InvoiceDraft, InvoiceWithItems};

use super::{search_filter, Context};
use crate::cli::{InvoiceCommand, NewInvoiceArgs};
use crate::error::AppError;
use crate::render;

pub async fn run(ctx: &Context, cmd: InvoiceCommand) -> Result<String, AppError> {
    match cmd {
        InvoiceCommand::List { search } => {
            let invoices = list(ctx, search).await?;
            if ctx.is_json() {
                render::to_json(&invoices)
            } else {
                Ok(render::invoices(&invoices, &ctx.config))
            }
        }
        InvoiceCommand::Show { id } => {
            let invoice = show(ctx, &id).await?;
            if ctx.is_json() {
                render::to_json(&invoice)
            } else {
                Ok(render::invoice(&invoice, &ctx.config))
            }
        }
        InvoiceCommand::New(args) => {
            let invoice = create(ctx, args).await?;
            if ctx.is_json() {
                render::to_json(&invoice)
            } else {
                Ok(render::invoice(&invoice, &ctx.config))
            }
        }
    }
}

/// Invoices newest first, each with its lines, filtered by invoice number.
pub async fn list(ctx: &Context, search: Option<String>) -> Result<Vec<InvoiceWithItems>, AppError> {
    let query = search_filter(search)?;
    debug!(query = ?query, "list invoices");

    let invoices = ctx.db.invoices().list_with_items().await?;
    Ok(match query {
        Some(q) => invoices
            .into_iter()
            .filter(|entry| entry.invoice.matches(&q))
            .collect(),
        None => invoices,
    })
}

pub async fn show(ctx: &Context, id: &str) -> Result<InvoiceWithItems, AppError> {
    let id = parse_record_id("invoice id", id)?;
    ctx.db
        .invoices()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Invoice", &id))
}

pub async fn create(ctx: &Context, args: NewInvoiceArgs) -> Result<InvoiceWithItems, AppError> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let mut draft = InvoiceDraft::new(args.number, date, args.description)
        .with_tax_rate(ctx.config.default_tax_rate);

    for spec in &args.items {
        let product_id = parse_record_id("item product", &spec.product_id)?;
        let product = ctx
            .db
            .products()
            .get_by_id(&product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product", &product_id))?;

        let line = draft.add_product_line(&product, spec.quantity)?;
        if let Some(tax) = spec.tax {
            draft.set_tax(line, tax)?;
        }
        if let Some(discount) = spec.discount {
            draft.set_discount(line, discount)?;
        }
    }

    let totals = draft.totals();
    debug!(
        lines = draft.lines().len(),
        subtotal = %totals.subtotal,
        total = %totals.total,
        "Invoice draft complete"
    );

    let created = ctx.db.invoices().create(&draft.into_new_invoice()?).await?;
    info!(
        id = %created.invoice.id,
        number = %created.invoice.invoice_number,
        total = %created.invoice.total(),
        "Invoice created"
    );
    Ok(created)
}
