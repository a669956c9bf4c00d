use std::path::PathBuf;
use std::sync::Arc;

use backoffice::config::{BackofficeConfig, ConfigError, normalize_base_url};
use backoffice::net::{ApiError, AuthClient, AuthResult, AuthSession, CatalogClient};
use backoffice::routes::admin::{ERROR_VIEW, NOT_FOUND_ROUTE, admin_table};
use backoffice::routes::{
    BuiltinViewLoader, NavigateError, NavigationGuard, Navigator, RouteTableError, Target, View, ViewId,
    ViewLoader, ViewRegistry, ViewState,
};
use backoffice::session::{self, FileSessionStore, SessionError};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("session store error: {0}")]
    Session(#[from] SessionError),
    #[error("route table error: {0}")]
    Routes(#[from] RouteTableError),
    #[error("navigation failed: {0}")]
    Navigate(#[from] NavigateError),
    #[error("login failed: {0}")]
    LoginFailed(String),
    #[error("invalid --param {0:?}; expected key=value")]
    InvalidParam(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "backoffice", about = "Admin dashboard routing and API client")]
struct Cli {
    #[arg(long, env = "BACKOFFICE_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "BACKOFFICE_CATALOG_URL")]
    catalog_url: Option<String>,

    #[arg(long, env = "BACKOFFICE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the returned tokens.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Revoke the stored token and clear the session.
    Logout,
    /// Report whether a credential flag is stored.
    Whoami,
    /// Print the product catalog as JSON.
    Products,
    /// List every navigable route.
    Routes,
    /// Run a guarded navigation and print the resulting location.
    Navigate {
        /// Concrete path, e.g. `/usermanagement/users`.
        #[arg(required_unless_present = "name", conflicts_with = "name")]
        path: Option<String>,
        /// Route name instead of a path.
        #[arg(long)]
        name: Option<String>,
        /// Route param for named navigation, `key=value`.
        #[arg(long = "param", requires = "name")]
        params: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Login { email, password } => run_login(&config, &email, &password).await,
        Command::Logout => run_logout(&config).await,
        Command::Whoami => run_whoami(&config),
        Command::Products => run_products(&config).await,
        Command::Routes => run_routes(),
        Command::Navigate { path, name, params } => run_navigate(&config, path, name, &params).await,
    }
}

fn resolve_config(cli: &Cli) -> Result<BackofficeConfig, CliError> {
    let mut config = BackofficeConfig::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config.api_url = normalize_base_url(api_url);
    }
    if let Some(catalog_url) = &cli.catalog_url {
        config.catalog_url.clone_from(catalog_url);
    }
    if let Some(session_file) = &cli.session_file {
        config.session_file.clone_from(session_file);
    }
    Ok(config)
}

fn open_auth_session(config: &BackofficeConfig) -> Result<AuthSession<FileSessionStore>, CliError> {
    let store = Arc::new(FileSessionStore::open(&config.session_file)?);
    Ok(AuthSession::new(AuthClient::from_config(config)?, store))
}

async fn run_login(config: &BackofficeConfig, email: &str, password: &str) -> Result<(), CliError> {
    let auth = open_auth_session(config)?;
    match auth.sign_in(email, password).await? {
        AuthResult::Success { message, .. } => {
            if message.is_empty() {
                println!("logged in");
            } else {
                println!("{message}");
            }
            Ok(())
        }
        AuthResult::Failure { message } => Err(CliError::LoginFailed(message)),
    }
}

async fn run_logout(config: &BackofficeConfig) -> Result<(), CliError> {
    open_auth_session(config)?.sign_out().await?;
    println!("logged out");
    Ok(())
}

fn run_whoami(config: &BackofficeConfig) -> Result<(), CliError> {
    let store = FileSessionStore::open(&config.session_file)?;
    if session::is_authenticated(&store) {
        println!("authenticated ({})", store.path().display());
    } else {
        println!("not authenticated");
    }
    Ok(())
}

async fn run_products(config: &BackofficeConfig) -> Result<(), CliError> {
    let products = CatalogClient::from_config(config)?.get_products().await?;
    print_json(&products)
}

fn run_routes() -> Result<(), CliError> {
    let table = admin_table()?;
    for entry in table.entries() {
        println!(
            "{:<34} {:<18} {:<44} {}{}",
            entry.pattern(),
            entry.name().unwrap_or("-"),
            entry.view().map_or("-", ViewId::as_str),
            entry.layout().map_or("", |_| "[app] "),
            if entry.requires_auth() { "[auth]" } else { "" },
        );
    }
    Ok(())
}

async fn run_navigate(
    config: &BackofficeConfig,
    path: Option<String>,
    name: Option<String>,
    params: &[String],
) -> Result<(), CliError> {
    let target = match (path, name) {
        (_, Some(name)) => {
            let mut target = Target::named(name);
            for raw in params {
                let (key, value) = raw.split_once('=').ok_or_else(|| CliError::InvalidParam(raw.clone()))?;
                target = target.with_param(key, value);
            }
            target
        }
        (Some(path), None) => Target::path(path),
        (None, None) => Target::path("/"),
    };

    let store = Arc::new(FileSessionStore::open(&config.session_file)?);
    let loader: Arc<dyn ViewLoader> = Arc::new(BuiltinViewLoader::default());
    let fallback = loader.load(ViewId(ERROR_VIEW)).await.ok();
    let mut views = ViewRegistry::new(loader);
    if let Some(fallback) = fallback {
        views = views.with_fallback(fallback);
    }
    let mut navigator = Navigator::new(Arc::new(admin_table()?), NavigationGuard::default(), store, views);

    let navigation = match navigator.navigate(target).await {
        Ok(navigation) => navigation,
        Err(NavigateError::NotFound(path)) => {
            tracing::warn!(%path, "no route matched, showing not-found page");
            navigator.navigate(Target::named(NOT_FOUND_ROUTE)).await?
        }
        Err(e) => return Err(e.into()),
    };

    let view = match &navigation.view {
        ViewState::Loaded(view) => view_json(view, None),
        ViewState::Failed { error, fallback } => {
            fallback.as_ref().map_or(Value::Null, |v| view_json(v, Some(error.to_string())))
        }
        ViewState::Empty => Value::Null,
    };
    let location = &navigation.location;
    print_json(&serde_json::json!({
        "name": location.name,
        "path": location.path,
        "params": location.params,
        "layout": location.layout.map(|_| "app"),
        "props": location.props,
        "redirected_from": navigation.redirected_from,
        "view": view,
    }))
}

fn view_json(view: &View, error: Option<String>) -> Value {
    serde_json::json!({ "id": view.id.as_str(), "title": view.title, "error": error })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
