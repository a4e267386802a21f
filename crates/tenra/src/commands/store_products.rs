//! Per-store assortment command handlers.

use std::sync::Arc;

use tabled::Tabled;
use tenra_core::{Backoffice, Price, StoreProduct, StoreProductPatch};

use crate::cli::{GlobalOpts, StoreProductsArgs, StoreProductsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StoreProductRow {
    #[tabled(rename = "UPC")]
    upc: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Inventory")]
    inventory: i64,
    #[tabled(rename = "Price")]
    price: String,
}

impl From<&Arc<StoreProduct>> for StoreProductRow {
    fn from(sp: &Arc<StoreProduct>) -> Self {
        Self {
            upc: sp.product.upc.clone(),
            name: sp.product.name.clone(),
            inventory: sp.inventory,
            price: sp
                .effective_price()
                .map(|p| p.display.clone())
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: StoreProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StoreProductsCommand::List { store, list } => {
            let store_id = util::resolve_store(backoffice, store.as_deref())?;
            backoffice
                .fetch_store_products(&store_id, util::list_fetch_options(&list))
                .await?;
            if let Some(ref query) = list.search {
                backoffice.search_store_products(query);
            }

            let snap = backoffice.store().store_products_snapshot();
            let out = output::render_list(
                &global.output,
                &snap,
                |sp| StoreProductRow::from(sp),
                |sp| sp.product.upc.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StoreProductsCommand::Update {
            upc,
            store,
            inventory,
            price,
        } => {
            let store_id = util::resolve_store(backoffice, store.as_deref())?;
            let patch = StoreProductPatch {
                inventory,
                price: price.map(|amount| Price {
                    amount,
                    display: amount.to_string(),
                    sale_amount: None,
                    sale_display: None,
                }),
            };
            backoffice
                .update_store_product(&store_id, &upc, &patch)
                .await?;
            output::notify_success(
                &format!("Product {upc} updated for store {store_id}"),
                global.quiet,
            );
            Ok(())
        }
    }
}
