//! Clap derive structures for the `tenra` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tenra -- back-office CLI for the Tenra retail platform
#[derive(Debug, Parser)]
#[command(
    name = "tenra",
    version,
    about = "Manage your stores, catalog, staff, and orders from the command line",
    long_about = "The Tenra back office without the browser.\n\n\
        Data is cached per invocation exactly like the web back office:\n\
        listings are fetched once and re-served until a mutation or an\n\
        explicit --refresh invalidates them.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Environment profile to use
    #[arg(long, short = 'p', env = "TENRA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "TENRA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TENRA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates (staging)
    #[arg(long, short = 'k', env = "TENRA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "TENRA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with your phone number
    Login(LoginArgs),

    /// Sign out and clear the stored session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Manage product categories (admin)
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Manage the tenant catalog
    #[command(alias = "prod")]
    Products(ProductsArgs),

    /// Manage per-store assortments (inventory, price overrides)
    #[command(name = "store-products", alias = "sp")]
    StoreProducts(StoreProductsArgs),

    /// List stores and select the working store
    Stores(StoresArgs),

    /// Manage tenant accounts
    Users(UsersArgs),

    /// List and advance store orders
    Orders(OrdersArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Phone number (falls back to the profile's phone_number)
    #[arg(long)]
    pub phone: Option<String>,
}

// ── Categories ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories
    List(ListArgs),

    /// Create a category
    Create {
        name: String,

        /// Custom property, repeatable: "name:type" or
        /// "name:select:opt1|opt2"
        #[arg(long = "property", value_name = "SPEC")]
        properties: Vec<String>,
    },

    /// Replace a category's name and properties
    Update {
        id: String,
        name: String,

        /// Custom property, repeatable (same syntax as create)
        #[arg(long = "property", value_name = "SPEC")]
        properties: Vec<String>,
    },

    /// Delete a category
    Delete { id: String },
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List the tenant catalog
    List(ListArgs),

    /// Add a product to the catalog
    Create {
        /// Unique business code
        upc: String,
        name: String,

        /// Price amount (e.g. 45000)
        #[arg(long)]
        price: Option<rust_decimal::Decimal>,

        /// Category id
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Update a catalog product
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<rust_decimal::Decimal>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Remove a product from the catalog
    Delete { id: String },
}

// ── Store products ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StoreProductsArgs {
    #[command(subcommand)]
    pub command: StoreProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StoreProductsCommand {
    /// List one store's assortment
    List {
        /// Store id (falls back to the selected/bound store)
        #[arg(long)]
        store: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Update inventory or the store price of one product
    Update {
        /// Product upc
        upc: String,

        /// Store id (falls back to the selected/bound store)
        #[arg(long)]
        store: Option<String>,

        #[arg(long)]
        inventory: Option<i64>,

        /// Store-scoped price override
        #[arg(long)]
        price: Option<rust_decimal::Decimal>,
    },
}

// ── Stores ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StoresArgs {
    #[command(subcommand)]
    pub command: StoresCommand,
}

#[derive(Debug, Subcommand)]
pub enum StoresCommand {
    /// List stores
    List(ListArgs),
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List accounts (whole tenant for admins, own store otherwise)
    List(ListArgs),

    /// Create a staff or manager account
    Create {
        /// "staff" or "manager"
        role: String,

        username: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: Option<String>,

        /// Store the account works at (required for staff)
        #[arg(long)]
        store: Option<String>,
    },

    /// Re-enable a deactivated account
    Activate { id: String },

    /// Disable an account
    Deactivate { id: String },
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List one store's orders
    List {
        /// Store id (falls back to the selected/bound store)
        #[arg(long)]
        store: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Advance an order to its next status
    Advance {
        id: String,

        /// Store the order belongs to (falls back to the selected/bound store)
        #[arg(long)]
        store: Option<String>,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the merged configuration
    Show,

    /// Store a profile's password in the system keyring
    SetPassword {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Shared list args ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Bypass the cache and refetch from the server
    #[arg(long)]
    pub refresh: bool,

    /// Client-side substring filter on the display field
    #[arg(long)]
    pub search: Option<String>,
}
