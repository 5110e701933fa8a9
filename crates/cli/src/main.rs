//! Doc Records CLI - Run CRUD operations against the document store.
//!
//! # Usage
//!
//! ```bash
//! # Run the example sequence (insert, find, update) against MongoDB
//! records run
//!
//! # Same sequence without a database server
//! records run --memory
//!
//! # Single user operations
//! records user insert -u exampleUser -e user@example.com --age 25
//! records user find exampleUser
//! records user update exampleUser --age 26
//! records user find-and-update exampleUser --address "1 New Street"
//! records user delete 65a1f0c2e4b0a1b2c3d4e5f6
//!
//! # List registered models
//! records models
//! ```
//!
//! # Environment Variables
//!
//! - `MONGODB_URI`, `MONGODB_DATABASE`, `MONGODB_APP_NAME` - see `StoreConfig`
//! - `RUST_LOG` - Log filter (default: `doc_records_cli=info,doc_records_store=info`)
//! - `RECORDS_LOG_FORMAT` - `json` for structured output, text otherwise

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use doc_records_core::UserId;
use doc_records_core::models::{NewUser, UserUpdate};
use doc_records_store::StoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "records")]
#[command(author, version, about = "Document store CRUD tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert, find and update the example user, then disconnect
    Run {
        /// Use an in-memory store instead of MongoDB
        #[arg(long)]
        memory: bool,
    },
    /// Run a single user operation
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// List registered models
    Models,
}

#[derive(Subcommand)]
enum UserAction {
    /// Insert a new user
    Insert {
        /// Username (required)
        #[arg(short, long)]
        username: String,

        /// Email address (required)
        #[arg(short, long)]
        email: String,

        /// Age in years
        #[arg(short, long)]
        age: Option<f64>,

        /// Postal address
        #[arg(long)]
        address: Option<String>,
    },
    /// Find a user by exact username
    Find {
        /// Username to look up
        username: String,
    },
    /// Update the first user with this username
    Update(UpdateArgs),
    /// Update the first user with this username and stamp `deletedAt`
    FindAndUpdate(UpdateArgs),
    /// Delete a user by ID
    Delete {
        /// User ID (24 hex characters)
        id: UserId,
    },
}

#[derive(Args)]
struct UpdateArgs {
    /// Username of the user to update
    username: String,

    /// New username
    #[arg(long)]
    new_username: Option<String>,

    /// New email address
    #[arg(long)]
    email: Option<String>,

    /// New age
    #[arg(long)]
    age: Option<f64>,

    /// New postal address
    #[arg(long)]
    address: Option<String>,
}

impl UpdateArgs {
    fn into_parts(self) -> (String, UserUpdate) {
        (
            self.username,
            UserUpdate {
                username: self.new_username,
                email: self.email,
                age: self.age,
                address: self.address,
            },
        )
    }
}

/// Initialize tracing with `EnvFilter`, JSON or text output.
fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "doc_records_cli=info,doc_records_store=info".into());

    let is_json = std::env::var("RECORDS_LOG_FORMAT").is_ok_and(|f| f == "json");
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Models => commands::run::list_models(),
        Commands::Run { memory } => {
            let config = StoreConfig::from_env()?;
            commands::run::run(&config, memory).await?;
        }
        Commands::User { action } => {
            let config = StoreConfig::from_env()?;
            match action {
                UserAction::Insert {
                    username,
                    email,
                    age,
                    address,
                } => {
                    let user = NewUser {
                        username,
                        email,
                        age,
                        address,
                    };
                    commands::users::insert(&config, user).await?;
                }
                UserAction::Find { username } => {
                    commands::users::find(&config, &username).await?;
                }
                UserAction::Update(args) => {
                    let (username, update) = args.into_parts();
                    commands::users::update(&config, &username, update).await?;
                }
                UserAction::FindAndUpdate(args) => {
                    let (username, update) = args.into_parts();
                    commands::users::find_and_update(&config, &username, update).await?;
                }
                UserAction::Delete { id } => commands::users::delete(&config, id).await?,
            }
        }
    }
    Ok(())
}
