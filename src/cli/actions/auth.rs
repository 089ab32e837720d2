//! Form actions: validate locally, make one request, persist what came back.
//! Validation failures never reach the network.

use crate::{
    auth::{Credentials, RegistrationRequest, Session, UserProfile},
    cli::globals::GlobalArgs,
    validators::{
        validate_credentials, validate_email, validate_password, validate_registration, FormErrors,
    },
};
use anyhow::{bail, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct LoginArgs {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct RegisterArgs {
    pub email: String,
    pub username: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

#[derive(Debug)]
pub struct ResetPasswordArgs {
    pub token: SecretString,
    pub password: SecretString,
}

/// One line per invalid field, in field order.
#[must_use]
pub fn render_form_errors(errors: &FormErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn ensure_valid(errors: &FormErrors) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        bail!(render_form_errors(errors))
    }
}

fn greeting(session: &Session) -> String {
    let name = session
        .user
        .as_ref()
        .map_or("User", UserProfile::display_name);
    format!("Signed in as {name}")
}

/// # Errors
/// Returns validation messages, the server's message, or a store failure.
pub async fn login(args: LoginArgs, globals: &GlobalArgs) -> Result<()> {
    let credentials = Credentials {
        email: args.email,
        password: args.password,
    };
    ensure_valid(&validate_credentials(&credentials))?;

    let (client, guard) = globals.session()?;
    let session = client.login(&credentials).await?;
    guard.store_session(&session)?;

    println!("{}", greeting(&session));
    Ok(())
}

/// # Errors
/// Returns validation messages, the server's message, or a store failure.
pub async fn register(args: RegisterArgs, globals: &GlobalArgs) -> Result<()> {
    let request = RegistrationRequest {
        email: args.email,
        username: args.username,
        password: args.password,
        confirm_password: args.confirm_password,
    };
    ensure_valid(&validate_registration(&request))?;

    let (client, guard) = globals.session()?;
    let session = client.register(&request).await?;
    guard.store_session(&session)?;

    println!("Account created. {}", greeting(&session));
    Ok(())
}

/// Tells the server, then clears local data whatever the server said.
///
/// # Errors
/// Returns an error only if the local session cannot be cleared.
pub async fn logout(globals: &GlobalArgs) -> Result<()> {
    let (client, guard) = globals.session()?;

    if let Err(err) = client.logout().await {
        warn!("server logout failed: {}", err);
        eprintln!("Server logout failed: {err}");
    }

    guard.clear_auth_data()?;

    println!("Signed out");
    Ok(())
}

/// # Errors
/// Returns the server's message if the profile cannot be fetched.
pub async fn me(globals: &GlobalArgs) -> Result<()> {
    let (client, _) = globals.session()?;
    let user = client.current_user().await?;

    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

/// Stores the new token, keeping the cached profile when the server sends none.
///
/// # Errors
/// Returns the server's message or a store failure.
pub async fn refresh(globals: &GlobalArgs) -> Result<()> {
    let (client, guard) = globals.session()?;
    let session = client.refresh().await?;

    let session = Session {
        user: session.user.or_else(|| guard.stored_user()),
        token: session.token,
    };
    guard.store_session(&session)?;
    debug!("session refreshed");

    println!("Session refreshed");
    Ok(())
}

/// # Errors
/// Returns a validation message or the server's message.
pub async fn forgot_password(email: &str, globals: &GlobalArgs) -> Result<()> {
    if !validate_email(email) {
        bail!("email: Please enter a valid email address");
    }

    let (client, _) = globals.session()?;
    client.forgot_password(email).await?;

    println!("If an account exists for {email}, a reset link is on its way");
    Ok(())
}

/// # Errors
/// Returns every password rule violated, or the server's message.
pub async fn reset_password(args: ResetPasswordArgs, globals: &GlobalArgs) -> Result<()> {
    let validation = validate_password(args.password.expose_secret());
    if !validation.is_valid() {
        bail!(validation
            .errors
            .iter()
            .map(|error| format!("password: {error}"))
            .collect::<Vec<_>>()
            .join("\n"));
    }

    let (client, _) = globals.session()?;
    client.reset_password(&args.token, &args.password).await?;

    println!("Password updated. Sign in with the new password");
    Ok(())
}
