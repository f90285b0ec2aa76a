mod cli;

use anyhow::Context;
use clap::Parser;
use cli::app::App;
use cli::{AdminSubcommand, Cli, Command};
use realnest::api::{HttpApi, MarketplaceApi};
use realnest::forms::RegisterForm;
use realnest::pages::FormMode;
use realnest::routes::Route;
use realnest::session::{AuthProvider, FileStore};
use realnest::ClientConfig;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only carries rendered pages
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = &args.api_url {
        config = config.with_api_base_url(url);
    }
    if let Some(path) = args.session_file.clone() {
        config = config.with_session_file(path);
    }
    debug!("Using API at {} with session file {}", config.api_base_url, config.session_file.display());

    let api: Arc<dyn MarketplaceApi> = Arc::new(HttpApi::new(&config).context("Failed to create HTTP client")?);
    let store = FileStore::new(&config.session_file);
    let auth = AuthProvider::load(api, Box::new(store))
        .with_context(|| format!("Failed to load session from {}", config.session_file.display()))?;
    let mut app = App::new(auth);

    match args.command {
        Command::Login { email, password } => app.login(email, password).await,
        Command::Register { name, email, password, confirm_password } => {
            app.register(RegisterForm { name, email, password, confirm_password }).await
        }
        Command::Logout => app.logout(),
        Command::Whoami => {
            app.whoami();
            Ok(())
        }
        Command::Open { path } => match Route::parse(&path) {
            Some(route) => app.visit(route).await,
            None => anyhow::bail!("no page at {path}"),
        },
        Command::Browse { page, filters } => app.show_home(filters.into(), page).await,
        Command::Show { id } => app.visit(Route::PropertyDetails(id)).await,
        Command::Mine { page } => app.show_dashboard(page).await,
        Command::Create { fields, image } => app.save_property(FormMode::Create, fields, image.as_deref()).await,
        Command::Edit { id, fields, image } => app.save_property(FormMode::Edit(id), fields, image.as_deref()).await,
        Command::Delete { id, yes } => app.delete_property(id, yes).await,
        Command::Admin(admin) => match admin.command {
            AdminSubcommand::Pending { page } => app.admin_pending(page).await,
            AdminSubcommand::Approve { id, page } => app.admin_review(id, true, page).await,
            AdminSubcommand::Reject { id, page } => app.admin_review(id, false, page).await,
            AdminSubcommand::Users { page } => app.admin_users(page).await,
            AdminSubcommand::SetRole { id, role, page } => app.admin_set_role(id, role, page).await,
            AdminSubcommand::DeleteUser { id, page, yes } => app.admin_delete_user(id, page, yes).await,
        },
    }
}
