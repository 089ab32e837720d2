use crate::cli::{
    actions::{auth, dashboard, Action},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point: a new `Action::*` variant needs its call here.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Login(args) => auth::login(args, globals).await,
        Action::Register(args) => auth::register(args, globals).await,
        Action::Logout => auth::logout(globals).await,
        Action::Me => auth::me(globals).await,
        Action::Refresh => auth::refresh(globals).await,
        Action::ForgotPassword { email } => auth::forgot_password(&email, globals).await,
        Action::ResetPassword(args) => auth::reset_password(args, globals).await,
        Action::Status => dashboard::status(globals),
        Action::Dashboard => dashboard::dashboard(globals),
    }
}
