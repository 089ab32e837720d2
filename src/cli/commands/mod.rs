use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn email_arg() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .help("Account email address")
        .env("LEGALEYES_EMAIL")
        .required(true)
}

fn password_arg(help: &'static str) -> Arg {
    Arg::new("password")
        .short('p')
        .long("password")
        .help(help)
        .env("LEGALEYES_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("legaleyes")
        .about("Legal Eyes session client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("API base URL, example: https://api.legaleyes.dev/api (default: http://localhost:8000/api, demo mode)")
                .env("LEGALEYES_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .help("Session file path (default: $HOME/.legaleyes/session.json)")
                .env("LEGALEYES_STORE")
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("LEGALEYES_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("LEGALEYES_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(email_arg())
                .arg(password_arg("Account password")),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and store the session")
                .arg(email_arg())
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Username, 3 to 20 characters")
                        .required(true),
                )
                .arg(password_arg("Password, at least 8 characters"))
                .arg(
                    Arg::new("confirm-password")
                        .short('c')
                        .long("confirm-password")
                        .help("Repeat the password")
                        .env("LEGALEYES_CONFIRM_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Sign out and clear the stored session"))
        .subcommand(Command::new("me").about("Show the current user's profile"))
        .subcommand(Command::new("refresh").about("Exchange the stored token for a new one"))
        .subcommand(
            Command::new("forgot-password")
                .about("Request a password reset email")
                .arg(email_arg()),
        )
        .subcommand(
            Command::new("reset-password")
                .about("Set a new password with a reset token")
                .arg(
                    Arg::new("token")
                        .short('t')
                        .long("token")
                        .help("Reset token from the email link")
                        .env("LEGALEYES_RESET_TOKEN")
                        .hide_env_values(true)
                        .required(true),
                )
                .arg(password_arg("New password")),
        )
        .subcommand(Command::new("status").about("Show whether a valid session is stored"))
        .subcommand(Command::new("dashboard").about("Show the dashboard for the signed-in user"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "legaleyes");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Legal Eyes session client"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_login_args() {
        temp_env::with_vars(
            [
                ("LEGALEYES_EMAIL", None::<&str>),
                ("LEGALEYES_PASSWORD", None),
                ("LEGALEYES_API_URL", None),
                ("LEGALEYES_TIMEOUT", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "legaleyes",
                    "login",
                    "--email",
                    "jane@legaleyes.com",
                    "--password",
                    "Str0ng!pass",
                ]);
                let (name, sub) = matches.subcommand().unwrap();
                assert_eq!(name, "login");
                assert_eq!(
                    sub.get_one::<String>("email").map(String::as_str),
                    Some("jane@legaleyes.com")
                );
                assert_eq!(
                    sub.get_one::<String>("password").map(String::as_str),
                    Some("Str0ng!pass")
                );
                assert_eq!(matches.get_one::<u64>("timeout").copied(), Some(10));
                assert_eq!(matches.get_one::<String>("api-url"), None);
            },
        );
    }

    #[test]
    fn test_login_requires_password() {
        temp_env::with_vars([("LEGALEYES_PASSWORD", None::<&str>)], || {
            let result = new().try_get_matches_from(vec![
                "legaleyes",
                "login",
                "--email",
                "jane@legaleyes.com",
            ]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("LEGALEYES_API_URL", Some("https://api.legaleyes.dev/api")),
                ("LEGALEYES_STORE", Some("/tmp/legaleyes.json")),
                ("LEGALEYES_TIMEOUT", Some("3")),
                ("LEGALEYES_EMAIL", Some("jane@legaleyes.com")),
                ("LEGALEYES_PASSWORD", Some("Str0ng!pass")),
                ("LEGALEYES_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["legaleyes", "login"]);
                assert_eq!(
                    matches.get_one::<String>("api-url").map(String::as_str),
                    Some("https://api.legaleyes.dev/api")
                );
                assert_eq!(
                    matches.get_one::<String>("store").map(String::as_str),
                    Some("/tmp/legaleyes.json")
                );
                assert_eq!(matches.get_one::<u64>("timeout").copied(), Some(3));
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));

                let (_, sub) = matches.subcommand().unwrap();
                assert_eq!(
                    sub.get_one::<String>("email").map(String::as_str),
                    Some("jane@legaleyes.com")
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("LEGALEYES_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["legaleyes", "status"]);
                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5 {
            temp_env::with_vars([("LEGALEYES_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["legaleyes".to_string(), "status".to_string()];

                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_register_requires_confirmation() {
        temp_env::with_vars(
            [
                ("LEGALEYES_CONFIRM_PASSWORD", None::<&str>),
                ("LEGALEYES_PASSWORD", None),
                ("LEGALEYES_EMAIL", None),
            ],
            || {
                let result = new().try_get_matches_from(vec![
                    "legaleyes",
                    "register",
                    "-e",
                    "jane@legaleyes.com",
                    "-u",
                    "jane",
                    "-p",
                    "Str0ng!pass",
                ]);
                assert!(result.is_err());
            },
        );
    }
}
