//! Sign-in / sign-out / whoami handlers.

use std::io::{self, IsTerminal, Write};

use tenra_core::Backoffice;

use crate::cli::{GlobalOpts, LoginArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Sign in and persist the session.
///
/// Phone number comes from `--phone` or the profile; the password from
/// the credential chain (env, keyring, profile), falling back to an
/// interactive prompt.
pub async fn login(
    backoffice: &Backoffice,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let cfg = tenra_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    let phone = match args.phone.or_else(|| profile.and_then(|p| p.phone_number.clone())) {
        Some(phone) => phone,
        None => prompt_line("Phone number: ")?,
    };

    let password = match profile.and_then(|p| tenra_config::resolve_password(p, &profile_name).ok())
    {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")
            .map_err(CliError::Io)?
            .into(),
    };

    let session = backoffice.sign_in(&phone, &password).await?;

    output::notify_success(
        &format!(
            "Signed in as {} ({})",
            session.user.display_name(),
            session.role()
        ),
        global.quiet,
    );
    Ok(())
}

/// Sign out and clear the persisted session.
pub fn logout(backoffice: &Backoffice, global: &GlobalOpts) -> Result<(), CliError> {
    backoffice.sign_out()?;
    output::notify_success("Signed out", global.quiet);
    Ok(())
}

/// Show the signed-in account.
pub fn whoami(backoffice: &Backoffice, global: &GlobalOpts) -> Result<(), CliError> {
    let session = backoffice.session().ok_or(CliError::NotSignedIn)?;
    let user = &session.user;

    let out = match global.output {
        OutputFormat::Json => {
            serde_json::to_string_pretty(user).expect("serialization should not fail")
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(user).expect("serialization should not fail")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(user).expect("serialization should not fail")
        }
        OutputFormat::Table | OutputFormat::Plain => {
            let store = user
                .store
                .as_ref()
                .and_then(|s| s.name.clone())
                .unwrap_or_else(|| "-".into());
            format!(
                "{} ({})\n  role:  {}\n  store: {store}",
                user.display_name(),
                user.username,
                user.role
            )
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

/// The profile selected by flag, config default, or "default".
pub fn active_profile_name(global: &GlobalOpts, cfg: &tenra_config::Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

fn prompt_line(prompt: &str) -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "phone".into(),
            reason: "no phone number given and stdin is not a terminal (use --phone)".into(),
        });
    }
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}
