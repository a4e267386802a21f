//! Configuration command handlers. These never touch the network.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::auth::active_profile_name;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&tenra_config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = tenra_config::load_config_or_default();
            // Never echo plaintext passwords back.
            for profile in cfg.profiles.values_mut() {
                if profile.password.is_some() {
                    profile.password = Some("<redacted>".into());
                }
            }
            let rendered = toml::to_string_pretty(&cfg)
                .map_err(tenra_config::ConfigError::Serialization)?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let cfg = tenra_config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| active_profile_name(global, &cfg));

            let password = rpassword::prompt_password(format!(
                "Password for profile '{profile_name}': "
            ))
            .map_err(CliError::Io)?;
            tenra_config::store_password(&profile_name, &password)?;
            output::notify_success(
                &format!("Password stored in the system keyring for '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }
    }
}
