//! Command handlers, one module per resource.

pub mod auth;
pub mod categories;
pub mod config_cmd;
pub mod orders;
pub mod products;
pub mod store_products;
pub mod stores;
pub mod users;
pub mod util;

use tenra_core::Backoffice;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    backoffice: &Backoffice,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Login(args) => auth::login(backoffice, args, global).await,
        Command::Logout => auth::logout(backoffice, global),
        Command::Whoami => auth::whoami(backoffice, global),
        Command::Categories(args) => categories::handle(backoffice, args, global).await,
        Command::Products(args) => products::handle(backoffice, args, global).await,
        Command::StoreProducts(args) => store_products::handle(backoffice, args, global).await,
        Command::Stores(args) => stores::handle(backoffice, args, global).await,
        Command::Users(args) => users::handle(backoffice, args, global).await,
        Command::Orders(args) => orders::handle(backoffice, args, global).await,
        Command::Config(_) => unreachable!("config commands are dispatched before connecting"),
    }
}

/// Local role gate for admin-only commands. The server checks again;
/// this only mirrors the web back office hiding those screens.
pub(crate) fn require_admin(backoffice: &Backoffice, action: &str) -> Result<(), CliError> {
    let session = backoffice.session().ok_or(CliError::NotSignedIn)?;
    if session.is_authorized_for_admin() {
        Ok(())
    } else {
        Err(CliError::NotAuthorized {
            action: action.to_owned(),
            required: "admin",
            actual: session.role().to_string(),
        })
    }
}

/// Local role gate for manager-level commands.
pub(crate) fn require_manager(backoffice: &Backoffice, action: &str) -> Result<(), CliError> {
    let session = backoffice.session().ok_or(CliError::NotSignedIn)?;
    if session.is_authorized_for_manager() {
        Ok(())
    } else {
        Err(CliError::NotAuthorized {
            action: action.to_owned(),
            required: "manager",
            actual: session.role().to_string(),
        })
    }
}
