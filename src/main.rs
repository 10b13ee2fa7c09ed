use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use serde::Serialize;

use blog_client::config::{ApiEnvironment, ConfigError, ServiceUrls};
use blog_client::net::session::SessionCredential;
use blog_client::{ApiError, AppStore, BLOG_CATEGORIES, BlogFilter, ClientConfig};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("client setup failed: {0}")]
    Api(#[from] ApiError),
    #[error("refetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("not signed in; pass --session-token or set BLOG_SESSION_TOKEN")]
    NotSignedIn,
}

#[derive(Parser, Debug)]
#[command(name = "blog-client", about = "Headless client for the blog user and blog services")]
struct Cli {
    /// Session token sent as the `token` cookie on credentialed requests.
    #[arg(long, env = "BLOG_SESSION_TOKEN")]
    session_token: Option<String>,

    /// Use the hosted service URLs regardless of `USE_PROD_API`.
    #[arg(long)]
    prod: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load everything the front-end loads on start and print the state.
    Mount,
    /// Print the signed-in user.
    Me,
    /// List blogs, optionally filtered.
    Blogs {
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long, value_parser = PossibleValuesParser::new(BLOG_CATEGORIES))]
        category: Option<String>,
    },
    /// List the signed-in user's saved blogs.
    Saved,
    /// Print the category list offered by the picker.
    Categories,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if cli.prod {
        config.environment = ApiEnvironment::Production;
        config.services = ServiceUrls::defaults(ApiEnvironment::Production);
    }

    let session = SessionCredential::new(cli.session_token);
    let store = AppStore::from_config(&config, session)?;

    match cli.command {
        Command::Mount => {
            store.mount().await;
            print_json(&store.state())
        }
        Command::Me => {
            store.load_current_user().await;
            let user = store.state().user.ok_or(CliError::NotSignedIn)?;
            print_json(&user)
        }
        Command::Blogs { search, category } => run_blogs(&store, search, category).await,
        Command::Saved => {
            store.load_saved_blogs().await;
            let saved = store.state().saved_blogs.ok_or(CliError::NotSignedIn)?;
            print_json(&saved)
        }
        Command::Categories => print_json(&BLOG_CATEGORIES),
    }
}

async fn run_blogs(store: &AppStore, search: String, category: Option<String>) -> Result<(), CliError> {
    match store.set_filter(BlogFilter::new(search, category.unwrap_or_default())) {
        Some(reload) => reload.await?,
        None => store.load_blogs().await,
    }
    print_json(&store.state().blogs.unwrap_or_default())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
