//! Store command handlers.

use std::sync::Arc;

use tabled::Tabled;
use tenra_core::{Backoffice, Store};

use crate::cli::{GlobalOpts, StoresArgs, StoresCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StoreRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Fulfillment")]
    fulfillment: String,
}

impl From<&Arc<Store>> for StoreRow {
    fn from(s: &Arc<Store>) -> Self {
        let hours = match (s.open_time, s.close_time) {
            (Some(open), Some(close)) => format!("{open:02}:00-{close:02}:00"),
            _ => String::new(),
        };
        let fulfillment = match (s.support_delivery, s.support_pickup) {
            (true, true) => "delivery, pickup",
            (true, false) => "delivery",
            (false, true) => "pickup",
            (false, false) => "-",
        };
        Self {
            id: s.id.to_string(),
            code: s.code.clone().unwrap_or_default(),
            name: s.name.clone(),
            hours,
            fulfillment: fulfillment.into(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: StoresArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StoresCommand::List(list) => {
            backoffice
                .fetch_stores(util::list_fetch_options(&list))
                .await?;
            if let Some(ref query) = list.search {
                backoffice.search_stores(query);
            }

            let snap = backoffice.store().stores_snapshot();
            let out =
                output::render_list(&global.output, &snap, |s| StoreRow::from(s), |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
