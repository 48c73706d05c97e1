use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use layra_auth::components::alert::AlertView;
use layra_auth::components::auth_form::FormView;
use layra_auth::config::{AuthConfig, ConfigError, DbConfig};
use layra_auth::db::{self, DbError};
use layra_auth::net::api::HttpAuthService;
use layra_auth::pages::sign_in::{AuthFormController, Navigator, SubmitOutcome};
use layra_auth::state::form::Field;
use layra_auth::state::notification::Notifier;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("database connect failed: {0}")]
    Connect(#[from] sqlx::Error),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("stdin read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "layra-auth", about = "LAYRA sign-in client and database bootstrap")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the LAYRA collections and provision the admin role.
    Migrate,
    /// Sign in (or sign up) interactively against the LAYRA API.
    SignIn {
        /// Start in registration mode.
        #[arg(long)]
        register: bool,
        /// Where to redirect after success (the page's `returnUrl`); defaults to `/`.
        #[arg(long)]
        return_url: Option<String>,
    },
}

/// Prints the redirect target instead of changing a browser location.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, destination: &str) {
        println!("-> {destination}");
    }
}

const HELP: &str = "commands: name <v> | email <v> | password <v> | toggle | submit | help | quit";

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; variables may come from the environment.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Migrate => migrate().await,
        Command::SignIn { register, return_url } => sign_in(register, return_url).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "layra-auth failed");
            ExitCode::FAILURE
        }
    }
}

async fn migrate() -> Result<(), CliError> {
    let config = DbConfig::from_env()?;
    let pool = db::init_pool(&config).await?;
    db::bootstrap(&pool, config.admin.as_ref()).await?;
    info!("database bootstrap complete");
    Ok(())
}

async fn sign_in(register: bool, return_url: Option<String>) -> Result<(), CliError> {
    let config = AuthConfig::from_env();
    let service = HttpAuthService::new(&config)?;
    let notifier = Notifier::new(config.notify_hide);
    let return_url = return_url.filter(|url| !url.is_empty());
    let mut ctrl = AuthFormController::new(service, TerminalNavigator, notifier, return_url);
    if register {
        ctrl.toggle_mode();
    }
    info!(api = %config.api_base_url, destination = ctrl.destination(), "sign-in started");

    println!("{HELP}");
    render(&ctrl);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let (command, value) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
        match command {
            "name" => ctrl.update_field(Field::Name, value),
            "email" => ctrl.update_field(Field::Email, value),
            "password" => ctrl.update_field(Field::Password, value),
            "toggle" => {
                ctrl.toggle_mode();
            }
            "submit" => match ctrl.submit().await {
                Ok(SubmitOutcome::Succeeded { .. }) => {
                    render(&ctrl);
                    match ctrl.service().verify_token().await {
                        Ok(Some(username)) => info!(%username, "session verified"),
                        Ok(None) => warn!("session token not recognized after login"),
                        Err(e) => warn!(error = %e, "session verification failed"),
                    }
                    return Ok(());
                }
                Ok(SubmitOutcome::Failed { .. }) => {}
                Err(refused) => println!("{refused}"),
            },
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            "" => continue,
            other => println!("unknown command `{other}`; {HELP}"),
        }
        render(&ctrl);
    }
    Ok(())
}

fn render(ctrl: &AuthFormController<HttpAuthService, TerminalNavigator>) {
    if let Some(alert) = AlertView::from_state(&ctrl.notifier().state()) {
        for line in &alert.lines {
            println!("** {line}");
        }
    }
    for line in FormView::from_state(ctrl.form()).render_lines() {
        println!("{line}");
    }
}
