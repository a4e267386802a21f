//! Catalog product command handlers.

use std::sync::Arc;

use tabled::Tabled;
use tenra_core::{Backoffice, EntityId, NewProduct, Price, Product, ProductPatch};

use crate::cli::{GlobalOpts, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::{require_manager, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "UPC")]
    upc: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&Arc<Product>> for ProductRow {
    fn from(p: &Arc<Product>) -> Self {
        Self {
            id: p.id.to_string(),
            upc: p.upc.clone(),
            name: p.name.clone(),
            price: p.price.as_ref().map(|pr| pr.display.clone()).unwrap_or_default(),
            updated: p
                .updated_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

fn price_from_amount(amount: rust_decimal::Decimal) -> Price {
    Price {
        amount,
        display: amount.to_string(),
        sale_amount: None,
        sale_display: None,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List(list) => {
            backoffice
                .fetch_products(util::list_fetch_options(&list))
                .await?;
            if let Some(ref query) = list.search {
                backoffice.search_products(query);
            }

            let snap = backoffice.store().products_snapshot();
            let out = output::render_list(
                &global.output,
                &snap,
                |p| ProductRow::from(p),
                |p| p.upc.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Create {
            upc,
            name,
            price,
            category,
            description,
        } => {
            require_manager(backoffice, "catalog changes")?;
            let product = NewProduct {
                upc: upc.clone(),
                name,
                price: price.map(price_from_amount),
                category: category.map(EntityId::from),
                description,
                images: Vec::new(),
            };
            backoffice.create_product(&product).await?;
            output::notify_success(&format!("Product {upc} added to the catalog"), global.quiet);
            Ok(())
        }

        ProductsCommand::Update {
            id,
            name,
            price,
            category,
            description,
        } => {
            require_manager(backoffice, "catalog changes")?;
            let patch = ProductPatch {
                name,
                price: price.map(price_from_amount),
                category: category.map(EntityId::from),
                description,
                images: None,
            };
            let id = EntityId::from(id);
            backoffice.update_product(&id, &patch).await?;
            output::notify_success(&format!("Product {id} updated"), global.quiet);
            Ok(())
        }

        ProductsCommand::Delete { id } => {
            require_manager(backoffice, "catalog changes")?;
            if !util::confirm(&format!("Delete product {id}?"), global.yes)? {
                return Ok(());
            }
            let id = EntityId::from(id);
            backoffice.delete_product(&id).await?;
            output::notify_success(&format!("Product {id} deleted"), global.quiet);
            Ok(())
        }
    }
}
