use crate::{
    auth::{
        guard::{DASHBOARD_PATH, LOGIN_PATH},
        RouteDecision, UserProfile,
    },
    cli::globals::GlobalArgs,
};
use anyhow::{bail, Result};
use std::fmt::Write;

pub const DEMO_BANNER: &str =
    "Demo Mode: Backend server not connected. Using demo authentication.";

/// Dashboard view for the given profile.
#[must_use]
pub fn render_dashboard(user: Option<&UserProfile>, demo_mode: bool) -> String {
    let name = user.map_or("User", UserProfile::display_name);
    let mut out = String::from("Welcome to Legal Eyes Dashboard\n");

    let _ = writeln!(out, "Hello, {name}!");
    if let Some(email) = user.and_then(|user| user.email.as_deref()) {
        let _ = writeln!(out, "Email: {email}");
    }

    if demo_mode {
        let _ = writeln!(out, "\n{DEMO_BANNER}");
        let _ = writeln!(out, "Set LEGALEYES_API_URL to connect to a backend.");
    }

    out
}

/// # Errors
/// Returns an error if the configuration is invalid.
pub fn status(globals: &GlobalArgs) -> Result<()> {
    let (client, guard) = globals.session()?;
    let config = client.config();

    if guard.is_authenticated() {
        let name = guard
            .stored_user()
            .map_or_else(|| "User".to_string(), |user| user.display_name().to_string());
        println!("Signed in as {name}");
    } else {
        println!("Not signed in");
    }

    println!("API: {}", config.base_url);
    if config.demo_mode {
        println!("{DEMO_BANNER}");
    }

    Ok(())
}

/// Protected view; without a live session it points at `login`.
///
/// # Errors
/// Returns an error if there is no live session.
pub fn dashboard(globals: &GlobalArgs) -> Result<()> {
    let (client, guard) = globals.session()?;

    match guard.resolve_route(DASHBOARD_PATH) {
        RouteDecision::Render(_) => {
            print!(
                "{}",
                render_dashboard(guard.stored_user().as_ref(), client.config().demo_mode)
            );
            Ok(())
        }
        RouteDecision::Redirect(LOGIN_PATH) => {
            bail!("Not signed in. Run `legaleyes login` first")
        }
        RouteDecision::Redirect(path) => bail!("Redirected to {path}"),
    }
}
