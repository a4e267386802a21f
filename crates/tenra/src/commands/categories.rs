//! Category command handlers (admin surface).

use std::sync::Arc;

use tabled::Tabled;
use tenra_core::{Backoffice, Category, EntityId};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;
use super::{require_admin, util::parse_properties};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Properties")]
    properties: String,
}

impl From<&Arc<Category>> for CategoryRow {
    fn from(c: &Arc<Category>) -> Self {
        let properties = c
            .properties
            .iter()
            .map(|p| format!("{} ({})", p.name, p.property_type))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            properties,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    require_admin(backoffice, "category management")?;

    match args.command {
        CategoriesCommand::List(list) => {
            backoffice
                .fetch_categories(util::list_fetch_options(&list))
                .await?;
            if let Some(ref query) = list.search {
                backoffice.search_categories(query);
            }

            let snap = backoffice.store().categories_snapshot();
            let out = output::render_list(
                &global.output,
                &snap,
                |c| CategoryRow::from(c),
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Create { name, properties } => {
            let properties = parse_properties(&properties)?;
            backoffice.create_category(&name, &properties).await?;
            output::notify_success(&format!("Category '{name}' created"), global.quiet);
            Ok(())
        }

        CategoriesCommand::Update {
            id,
            name,
            properties,
        } => {
            let properties = parse_properties(&properties)?;
            let id = EntityId::from(id);
            backoffice.update_category(&id, &name, &properties).await?;
            output::notify_success(&format!("Category {id} updated"), global.quiet);
            Ok(())
        }

        CategoriesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete category {id}?"), global.yes)? {
                return Ok(());
            }
            let id = EntityId::from(id);
            backoffice.delete_category(&id).await?;
            output::notify_success(&format!("Category {id} deleted"), global.quiet);
            Ok(())
        }
    }
}
