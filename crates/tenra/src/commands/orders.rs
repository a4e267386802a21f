//! Order command handlers.

use std::sync::Arc;

use tabled::Tabled;
use tenra_core::{Backoffice, EntityId, Order};

use crate::cli::{GlobalOpts, OrdersArgs, OrdersCommand};
use crate::error::CliError;
use crate::output;

use super::{require_manager, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Arc<Order>> for OrderRow {
    fn from(o: &Arc<Order>) -> Self {
        Self {
            id: o.id.to_string(),
            status: o.status.label().into(),
            payment: o.payment_status.map(|p| p.to_string()).unwrap_or_default(),
            total: o.display_total.clone().unwrap_or_default(),
            created: o
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: OrdersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        OrdersCommand::List { store, list } => {
            let store_id = util::resolve_store(backoffice, store.as_deref())?;
            backoffice
                .fetch_orders(&store_id, util::list_fetch_options(&list))
                .await?;

            let snap = backoffice.store().orders_snapshot();
            let out =
                output::render_list(&global.output, &snap, |o| OrderRow::from(o), |o| o.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OrdersCommand::Advance { id, store } => {
            require_manager(backoffice, "order handling")?;
            // The transition table needs the order's current status, so
            // make sure the store's orders are cached.
            let store_id = util::resolve_store(backoffice, store.as_deref())?;
            backoffice
                .fetch_orders(&store_id, tenra_core::FetchOptions::default())
                .await?;

            let id = EntityId::from(id);
            let moved_to = backoffice.advance_order(&id).await?;
            output::notify_success(
                &format!("Order {id} moved to '{}'", moved_to.label()),
                global.quiet,
            );
            Ok(())
        }
    }
}
