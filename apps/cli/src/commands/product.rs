//! # Product Commands
//!
//! List, add, edit and delete products.
//!
//! ## Delete Rule
//! ```text
//! products delete <ID>            → refused, asks for --yes
//! products delete <ID> --yes      → hard delete
//!        │
//!        └── product used on an invoice → refused by the invoice_items
//!            foreign key, record kept
//! ```

use tracing::{debug, info};

use nimbus_core::{parse_record_id, Money, NewProduct, Product, ProductChanges};
use nimbus_db::DbError;

use super::{search_filter, Context};
use crate::cli::ProductCommand;
use crate::error::{AppError, ErrorCode};
use crate::render;

pub async fn run(ctx: &Context, cmd: ProductCommand) -> Result<String, AppError> {
    match cmd {
        ProductCommand::List { search } => {
            let products = list(ctx, search).await?;
            if ctx.is_json() {
                render::to_json(&products)
            } else {
                Ok(render::products(&products, &ctx.config))
            }
        }
        ProductCommand::Add {
            name,
            price,
            stock,
            description,
        } => {
            let product = add(
                ctx,
                NewProduct {
                    name,
                    description,
                    price,
                    stock,
                },
            )
            .await?;
            show_saved(ctx, "Added", &product)
        }
        ProductCommand::Edit {
            id,
            name,
            price,
            stock,
            description,
        } => {
            let changes = ProductChanges {
                name,
                description,
                price,
                stock,
            };
            let product = edit(ctx, &id, changes).await?;
            show_saved(ctx, "Updated", &product)
        }
        ProductCommand::Delete { id, yes } => {
            if !yes {
                return Err(AppError::validation(
                    "Deleting a product cannot be undone; pass --yes to confirm",
                ));
            }
            let id = delete(ctx, &id).await?;
            if ctx.is_json() {
                render::to_json(&serde_json::json!({ "deleted": id }))
            } else {
                Ok(format!("Deleted product {}", id))
            }
        }
    }
}

fn show_saved(ctx: &Context, verb: &str, product: &Product) -> Result<String, AppError> {
    if ctx.is_json() {
        render::to_json(product)
    } else {
        Ok(format!(
            "{} product\n{}",
            verb,
            render::product(product, &ctx.config)
        ))
    }
}

/// All products ordered by name, filtered by name.
pub async fn list(ctx: &Context, search: Option<String>) -> Result<Vec<Product>, AppError> {
    let query = search_filter(search)?;
    debug!(query = ?query, "list products");

    let products = ctx.db.products().list().await?;
    Ok(match query {
        Some(q) => products.into_iter().filter(|p| p.matches(&q)).collect(),
        None => products,
    })
}

pub async fn add(ctx: &Context, product: NewProduct) -> Result<Product, AppError> {
    let product = product.validated()?;
    let created = ctx.db.products().insert(&product).await?;
    info!(id = %created.id, name = %created.name, price = %Money::from_cents(created.price_cents), "Product added");
    Ok(created)
}

/// Applies a partial edit. Fields left out keep their current value.
pub async fn edit(ctx: &Context, id: &str, changes: ProductChanges) -> Result<Product, AppError> {
    if changes.is_empty() {
        return Err(AppError::validation(
            "Nothing to change: pass at least one of --name, --price, --stock, --description",
        ));
    }

    let id = parse_record_id("product id", id)?;
    let current = ctx
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product", &id))?;

    let updated = changes.apply_to(&current)?;
    let saved = ctx.db.products().update(&id, &updated).await?;
    info!(id = %saved.id, "Product updated");
    Ok(saved)
}

/// Hard-deletes a product and returns its normalized id.
pub async fn delete(ctx: &Context, id: &str) -> Result<String, AppError> {
    let id = parse_record_id("product id", id)?;

    match ctx.db.products().delete(&id).await {
        Ok(()) => {
            info!(id = %id, "Product deleted");
            Ok(id)
        }
        Err(DbError::ForeignKeyViolation { message }) => {
            debug!(id = %id, reason = %message, "Product delete refused");
            Err(AppError::new(
                ErrorCode::Conflict,
                "Product is used on an invoice and cannot be deleted",
            ))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use chrono::NaiveDate;
    use nimbus_core::InvoiceDraft;

    fn lamp() -> NewProduct {
        NewProduct {
            name: "Desk Lamp".to_string(),
            description: Some("LED".to_string()),
            price: Money::from_cents(2499),
            stock: 18,
        }
    }

    #[tokio::test]
    async fn test_add_and_search() {
        let ctx = test_support::context().await;
        add(&ctx, lamp()).await.unwrap();
        add(
            &ctx,
            NewProduct {
                name: "Stapler".to_string(),
                description: None,
                price: Money::from_cents(875),
                stock: 40,
            },
        )
        .await
        .unwrap();

        assert_eq!(list(&ctx, None).await.unwrap().len(), 2);

        let hits = list(&ctx, Some("lamp".to_string())).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Desk Lamp");
    }

    #[tokio::test]
    async fn test_add_rejects_negative_stock() {
        let ctx = test_support::context().await;
        let mut bad = lamp();
        bad.stock = -1;

        let err = add(&ctx, bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_add_rejects_price_above_limit() {
        let ctx = test_support::context().await;
        let mut bad = lamp();
        bad.price = nimbus_core::MAX_AMOUNT + Money::from_cents(1);

        let err = add(&ctx, bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "price must not exceed $10000000.00");
        assert_eq!(ctx.db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_edit_keeps_unchanged_fields() {
        let ctx = test_support::context().await;
        let created = add(&ctx, lamp()).await.unwrap();

        let changes = ProductChanges {
            price: Some(Money::from_cents(1999)),
            ..Default::default()
        };
        let updated = edit(&ctx, &created.id, changes).await.unwrap();

        assert_eq!(updated.price_cents, 1999);
        assert_eq!(updated.name, "Desk Lamp");
        assert_eq!(updated.stock, 18);
        assert_eq!(updated.description.as_deref(), Some("LED"));
    }

    #[tokio::test]
    async fn test_edit_clears_description() {
        let ctx = test_support::context().await;
        let created = add(&ctx, lamp()).await.unwrap();

        let changes = ProductChanges {
            description: Some(String::new()),
            ..Default::default()
        };
        let updated = edit(&ctx, &created.id, changes).await.unwrap();
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn test_edit_errors() {
        let ctx = test_support::context().await;
        let created = add(&ctx, lamp()).await.unwrap();

        let err = edit(&ctx, &created.id, ProductChanges::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let changes = ProductChanges {
            stock: Some(1),
            ..Default::default()
        };
        let err = edit(&ctx, "not-a-uuid", changes.clone()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = edit(&ctx, "5f0c6c1e-2d7f-4d55-9d1b-2f6a3e8c9b10", changes)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let ctx = test_support::context().await;
        let created = add(&ctx, lamp()).await.unwrap();

        let err = run(
            &ctx,
            ProductCommand::Delete {
                id: created.id.clone(),
                yes: false,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(ctx.db.products().count().await.unwrap(), 1);

        let out = run(
            &ctx,
            ProductCommand::Delete {
                id: created.id.clone(),
                yes: true,
            },
        )
        .await
        .unwrap();
        assert_eq!(out, format!("Deleted product {}", created.id));
        assert_eq!(ctx.db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_product_on_invoice_is_refused() {
        let ctx = test_support::context().await;
        let product = add(&ctx, lamp()).await.unwrap();

        let mut draft = InvoiceDraft::new("INV-1", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), None);
        draft.add_product_line(&product, 1).unwrap();
        ctx.db
            .invoices()
            .create(&draft.into_new_invoice().unwrap())
            .await
            .unwrap();

        let err = delete(&ctx, &product.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Product is used on an invoice and cannot be deleted");
        assert!(ctx.db.products().get_by_id(&product.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let ctx = test_support::context().await;
        let err = delete(&ctx, "5f0c6c1e-2d7f-4d55-9d1b-2f6a3e8c9b10").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
