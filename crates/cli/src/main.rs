//! Paperback CLI - catalog administration and browse views.
//!
//! # Usage
//!
//! ```bash
//! # Seed empty collections from the fixture endpoints
//! pb-cli sync
//!
//! # Admin tables and CRUD
//! pb-cli books list --search dune
//! pb-cli books add --name "Dune" --author 1 --isbn 978-0441172719 \
//!     --language English --pages 412 --format Hardcover
//! pb-cli authors delete 3
//!
//! # Storefront-style browse views
//! pb-cli shop books
//! pb-cli shop inventory 2
//!
//! # Reset the persistent local store
//! pb-cli storage clear
//! ```
//!
//! # Commands
//!
//! - `sync` - Hydrate collections from the fixture source
//! - `books` / `authors` / `stores` - Admin listing and CRUD
//! - `shop` - Browse views with cross-collection lookups
//! - `storage` - Manage the persistent local store

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Args, Parser, Subcommand, ValueEnum};

use paperback_catalog::Collection;

mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "pb-cli")]
#[command(author, version, about = "Paperback catalog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hydrate collections from the fixture source
    Sync {
        /// Drop cached fixture responses before fetching
        #[arg(long)]
        refresh: bool,
    },
    /// Manage the books collection
    Books {
        #[command(subcommand)]
        action: BookAction,
    },
    /// Manage the authors collection
    Authors {
        #[command(subcommand)]
        action: AuthorAction,
    },
    /// Manage the stores collection
    Stores {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Storefront-style browse views
    Shop {
        #[command(subcommand)]
        view: ShopView,
    },
    /// Manage the persistent local store
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
}

#[derive(Subcommand)]
enum BookAction {
    /// List books
    List {
        /// Filter by name (case-insensitive substring)
        #[arg(short = 'q', long)]
        search: Option<String>,
    },
    /// Add a new book
    Add(AddBookArgs),
    /// Update an existing book
    Update(UpdateBookArgs),
    /// Delete a book by id
    Delete {
        /// Book id
        id: String,
    },
}

#[derive(Args)]
struct AddBookArgs {
    /// Title
    #[arg(long)]
    name: String,

    /// Author id
    #[arg(long)]
    author: i32,

    /// ISBN
    #[arg(long)]
    isbn: String,

    /// Publication language
    #[arg(long)]
    language: String,

    /// Page count (must be positive)
    #[arg(long)]
    pages: u32,

    /// Binding format (e.g. Hardcover, Paperback)
    #[arg(long)]
    format: String,

    /// Carrying store id
    #[arg(long)]
    store: Option<i32>,
}

#[derive(Args)]
struct UpdateBookArgs {
    /// Book id
    id: String,

    /// New title
    #[arg(long)]
    name: Option<String>,

    /// New author id
    #[arg(long)]
    author: Option<i32>,

    /// New ISBN
    #[arg(long)]
    isbn: Option<String>,

    /// New publication language
    #[arg(long)]
    language: Option<String>,

    /// New page count (must be positive)
    #[arg(long)]
    pages: Option<u32>,

    /// New binding format
    #[arg(long)]
    format: Option<String>,

    /// New carrying store id
    #[arg(long)]
    store: Option<i32>,
}

#[derive(Subcommand)]
enum AuthorAction {
    /// List authors
    List {
        /// Filter by name (case-insensitive substring)
        #[arg(short = 'q', long)]
        search: Option<String>,
    },
    /// Add a new author
    Add(AddAuthorArgs),
    /// Update an existing author
    Update(UpdateAuthorArgs),
    /// Delete an author by id
    Delete {
        /// Author id
        id: i32,
    },
}

#[derive(Args)]
struct AddAuthorArgs {
    /// Given name
    #[arg(long)]
    first_name: String,

    /// Family name
    #[arg(long)]
    last_name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Nationality
    #[arg(long)]
    nationality: String,
}

#[derive(Args)]
struct UpdateAuthorArgs {
    /// Author id
    id: i32,

    /// New given name
    #[arg(long)]
    first_name: Option<String>,

    /// New family name
    #[arg(long)]
    last_name: Option<String>,

    /// New contact email
    #[arg(long)]
    email: Option<String>,

    /// New nationality
    #[arg(long)]
    nationality: Option<String>,
}

#[derive(Subcommand)]
enum StoreAction {
    /// List stores
    List {
        /// Filter by name (case-insensitive substring)
        #[arg(short = 'q', long)]
        search: Option<String>,
    },
    /// Add a new store
    Add(AddStoreArgs),
    /// Update an existing store
    Update(UpdateStoreArgs),
    /// Delete a store by id
    Delete {
        /// Store id
        id: i32,
    },
}

#[derive(Args)]
struct AddStoreArgs {
    /// Store name
    #[arg(long)]
    name: String,

    /// First address line
    #[arg(long)]
    address_1: String,

    /// Second address line
    #[arg(long)]
    address_2: Option<String>,

    /// City
    #[arg(long)]
    city: String,

    /// State or region code
    #[arg(long)]
    state: String,

    /// Postal code
    #[arg(long)]
    zip: String,
}

#[derive(Args)]
struct UpdateStoreArgs {
    /// Store id
    id: i32,

    /// New store name
    #[arg(long)]
    name: Option<String>,

    /// New first address line
    #[arg(long)]
    address_1: Option<String>,

    /// New second address line
    #[arg(long)]
    address_2: Option<String>,

    /// New city
    #[arg(long)]
    city: Option<String>,

    /// New state or region code
    #[arg(long)]
    state: Option<String>,

    /// New postal code
    #[arg(long)]
    zip: Option<String>,
}

#[derive(Subcommand)]
enum ShopView {
    /// Browse books with their authors
    Books,
    /// Browse authors with their title counts
    Authors,
    /// Browse store locations
    Stores,
    /// Books carried by one store
    Inventory {
        /// Store id
        store_id: i32,
    },
}

#[derive(Subcommand)]
enum StorageAction {
    /// Remove persisted collections, returning them to the empty state
    Clear {
        /// Clear only one collection (default: all)
        #[arg(long)]
        collection: Option<CollectionArg>,
    },
}

/// Collection selector for storage commands.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CollectionArg {
    Books,
    Authors,
    Stores,
}

impl From<CollectionArg> for Collection {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Books => Self::Books,
            CollectionArg::Authors => Self::Authors,
            CollectionArg::Stores => Self::Stores,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    match cli.command {
        Commands::Sync { refresh } => commands::sync::run(&config, refresh).await?,
        Commands::Books { action } => match action {
            BookAction::List { search } => {
                commands::books::list(&config, search.as_deref()).await?;
            }
            BookAction::Add(args) => commands::books::add(&config, &args).await?,
            BookAction::Update(args) => commands::books::update(&config, &args).await?,
            BookAction::Delete { id } => commands::books::delete(&config, &id).await?,
        },
        Commands::Authors { action } => match action {
            AuthorAction::List { search } => {
                commands::authors::list(&config, search.as_deref()).await?;
            }
            AuthorAction::Add(args) => commands::authors::add(&config, &args).await?,
            AuthorAction::Update(args) => commands::authors::update(&config, &args).await?,
            AuthorAction::Delete { id } => commands::authors::delete(&config, id).await?,
        },
        Commands::Stores { action } => match action {
            StoreAction::List { search } => {
                commands::stores::list(&config, search.as_deref()).await?;
            }
            StoreAction::Add(args) => commands::stores::add(&config, &args).await?,
            StoreAction::Update(args) => commands::stores::update(&config, &args).await?,
            StoreAction::Delete { id } => commands::stores::delete(&config, id).await?,
        },
        Commands::Shop { view } => match view {
            ShopView::Books => commands::shop::books(&config).await?,
            ShopView::Authors => commands::shop::authors(&config).await?,
            ShopView::Stores => commands::shop::stores(&config).await?,
            ShopView::Inventory { store_id } => {
                commands::shop::inventory(&config, store_id).await?;
            }
        },
        Commands::Storage { action } => match action {
            StorageAction::Clear { collection } => {
                commands::storage::clear(&config, collection.map(Collection::from))?;
            }
        },
    }
    Ok(())
}
