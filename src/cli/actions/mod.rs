pub mod auth;
pub mod dashboard;

// Internal "interpreter" for `Action`, kept apart so this file stays small.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Login(auth::LoginArgs),
    Register(auth::RegisterArgs),
    Logout,
    Me,
    Refresh,
    ForgotPassword { email: String },
    ResetPassword(auth::ResetPasswordArgs),
    Status,
    Dashboard,
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if validation or the request fails; the message is the one shown to the user.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
