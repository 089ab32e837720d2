use crate::cli::{
    actions::{
        auth::{LoginArgs, RegisterArgs, ResetPasswordArgs},
        Action,
    },
    globals::{default_store_path, GlobalArgs},
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

fn secret(matches: &clap::ArgMatches, name: &str) -> Result<SecretString> {
    required(matches, name).map(SecretString::from)
}

/// Settings shared by all subcommands; the store path falls back to the home directory.
pub fn globals(matches: &clap::ArgMatches) -> GlobalArgs {
    let store_path = matches
        .get_one::<String>("store")
        .map_or_else(default_store_path, PathBuf::from);

    GlobalArgs {
        api_url: matches.get_one::<String>("api-url").cloned(),
        store_path,
        timeout: Duration::from_secs(matches.get_one::<u64>("timeout").copied().unwrap_or(10)),
    }
}

/// # Errors
/// Returns an error if the subcommand is unknown or required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let globals = globals(matches);

    let action = match matches.subcommand() {
        Some(("login", sub_m)) => Action::Login(LoginArgs {
            email: required(sub_m, "email")?,
            password: secret(sub_m, "password")?,
        }),
        Some(("register", sub_m)) => Action::Register(RegisterArgs {
            email: required(sub_m, "email")?,
            username: required(sub_m, "username")?,
            password: secret(sub_m, "password")?,
            confirm_password: secret(sub_m, "confirm-password")?,
        }),
        Some(("logout", _)) => Action::Logout,
        Some(("me", _)) => Action::Me,
        Some(("refresh", _)) => Action::Refresh,
        Some(("forgot-password", sub_m)) => Action::ForgotPassword {
            email: required(sub_m, "email")?,
        },
        Some(("reset-password", sub_m)) => Action::ResetPassword(ResetPasswordArgs {
            token: secret(sub_m, "token")?,
            password: secret(sub_m, "password")?,
        }),
        Some(("status", _)) => Action::Status,
        Some(("dashboard", _)) => Action::Dashboard,
        Some((name, _)) => return Err(anyhow!("unknown command: {name}")),
        None => return Err(anyhow!("missing command")),
    };

    Ok((action, globals))
}
