mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tenra_core::{Backoffice, BackofficeConfig, TlsVerification};

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need an API client
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // All other commands do
        cmd => {
            let config = build_backoffice_config(&cli.global)?;
            let backoffice = Backoffice::new(config)?;

            // Rehydrate the persisted session; `login` replaces it.
            if !matches!(cmd, Command::Login(_)) {
                backoffice.restore_session()?;
            }

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &backoffice, &cli.global).await
        }
    }
}

/// Build a `BackofficeConfig` from the config file, profile, and CLI
/// flag overrides.
fn build_backoffice_config(global: &cli::GlobalOpts) -> Result<BackofficeConfig, CliError> {
    let cfg = tenra_config::load_config_or_default();
    let profile_name = commands::auth::active_profile_name(global, &cfg);

    let mut config = if let Some(profile) = cfg.profiles.get(&profile_name) {
        tenra_config::profile_to_backoffice_config(profile, &cfg.defaults)?
    } else {
        // No profile -- build from CLI flags / env vars alone
        let url_str = global.api_url.as_deref().ok_or_else(|| CliError::NoConfig {
            path: tenra_config::config_path().display().to_string(),
        })?;

        let api_url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;

        BackofficeConfig::new(api_url)
    };

    // CLI flags override profile values
    if let Some(ref url_str) = global.api_url {
        config.api_url = url_str.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(timeout) = global.timeout {
        config.timeout = std::time::Duration::from_secs(timeout);
    }

    Ok(config)
}
