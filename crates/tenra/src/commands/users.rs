//! Tenant account command handlers.

use std::sync::Arc;

use tabled::Tabled;
use tenra_core::{Backoffice, EntityId, NewUser, User, UserRole};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::{require_admin, require_manager, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Store")]
    store: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Arc<User>> for UserRow {
    fn from(u: &Arc<User>) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            name: u.display_name(),
            role: u.role.to_string(),
            store: u
                .store
                .as_ref()
                .and_then(|s| s.name.clone())
                .unwrap_or_default(),
            active: if u.is_active { "yes" } else { "no" }.into(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    backoffice: &Backoffice,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List(list) => {
            backoffice.fetch_users(util::list_fetch_options(&list)).await?;
            if let Some(ref query) = list.search {
                backoffice.search_users(query);
            }

            let snap = backoffice.store().users_snapshot();
            let out =
                output::render_list(&global.output, &snap, |u| UserRow::from(u), |u| u.username.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Create {
            role,
            username,
            first_name,
            last_name,
            phone,
            email,
            store,
        } => {
            require_admin(backoffice, "account creation")?;

            let role: UserRole = role.parse().map_err(|_| CliError::Validation {
                field: "role".into(),
                reason: format!("expected 'staff' or 'manager', got '{role}'"),
            })?;

            let password = rpassword::prompt_password("Password for the new account: ")
                .map_err(CliError::Io)?;

            let user = NewUser {
                username: username.clone(),
                first_name,
                last_name,
                phone_number: phone,
                email,
                password: password.into(),
                store: store.map(EntityId::from),
            };
            backoffice.create_user(role, &user).await?;
            output::notify_success(&format!("Account '{username}' created"), global.quiet);
            Ok(())
        }

        UsersCommand::Activate { id } => {
            require_manager(backoffice, "account activation")?;
            let id = EntityId::from(id);
            backoffice.activate_user(&id).await?;
            output::notify_success(&format!("Account {id} activated"), global.quiet);
            Ok(())
        }

        UsersCommand::Deactivate { id } => {
            require_manager(backoffice, "account deactivation")?;
            if !util::confirm(&format!("Deactivate account {id}?"), global.yes)? {
                return Ok(());
            }
            let id = EntityId::from(id);
            backoffice.deactivate_user(&id).await?;
            output::notify_success(&format!("Account {id} deactivated"), global.quiet);
            Ok(())
        }
    }
}
