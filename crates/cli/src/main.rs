//! BrightBuy CLI - a terminal front end over the storefront domain store.
//!
//! # Usage
//!
//! ```bash
//! # Install the demo accounts
//! bb-cli seed
//!
//! # Sign in as the demo customer (any non-empty password works)
//! bb-cli login -e demo@example.com -p demo
//!
//! # Browse and shop
//! bb-cli products --category Electronics --query wireless
//! bb-cli cart add 1 --quantity 2
//! bb-cli checkout --city Springfield --zip 12345 --card 4242424242424242 --expiry 12/30 --cvv 123
//!
//! # Manage orders as the admin
//! bb-cli login -e admin@brightbuy.com -p admin
//! bb-cli admin set-status 1718000000000 shipped
//! ```
//!
//! State lives in the JSON file named by `BRIGHTBUY_DATA_FILE` (or
//! `--data-file`), so the session persists between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use brightbuy_core::OrderStatus;
use brightbuy_storefront::{DomainStore, FileStorage, LogFormat, StoreConfig};

mod commands;

#[derive(Parser)]
#[command(name = "bb-cli")]
#[command(author, version, about = "BrightBuy storefront CLI")]
struct Cli {
    /// Storage file (overrides `BRIGHTBUY_DATA_FILE`)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the demo admin and customer accounts if no accounts exist
    Seed,
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        name: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Edit the signed-in account
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Empty string clears the phone number
        #[arg(long)]
        phone: Option<String>,
        /// Empty string clears the address
        #[arg(long)]
        address: Option<String>,
    },
    /// Browse the catalog
    Products {
        /// Category name, or `All`
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive search over name and description
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only featured products
        #[arg(long)]
        featured: bool,
    },
    /// Manage the signed-in user's cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the cart. Name, email, address and phone default
    /// to the account's details.
    Checkout {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: String,
        #[arg(long)]
        zip: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        card: String,
        #[arg(long)]
        expiry: String,
        #[arg(long)]
        cvv: String,
    },
    /// List the signed-in user's orders
    Orders,
    /// Read notifications
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },
    /// Admin dashboard
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product
    Add {
        product_id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a product already in the cart
    Update { product_id: String, quantity: u32 },
    /// Remove a product
    Remove { product_id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum NotificationAction {
    /// List notifications
    List,
    /// Mark a notification as read
    Read { id: String },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Revenue, order and customer counts
    Dashboard,
    /// Every order
    Orders,
    /// Change an order's status
    SetStatus {
        order_id: String,
        /// `pending`, `processing`, `shipped` or `delivered`
        status: OrderStatus,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(cli: Cli, config: StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let path = cli.data_file.unwrap_or_else(|| config.data_file.clone());
    let mut store = DomainStore::open(FileStorage::open(&path)?)?;
    let mut events = store.subscribe();

    match cli.command {
        Commands::Seed => commands::account::seed(&store)?,
        Commands::Login { email, password } => {
            commands::account::login(&mut store, &email, &password)?;
        }
        Commands::Register {
            email,
            password,
            name,
        } => commands::account::register(&mut store, &email, &password, &name)?,
        Commands::Logout => commands::account::logout(&mut store)?,
        Commands::Whoami => commands::account::whoami(&store)?,
        Commands::Profile {
            name,
            email,
            phone,
            address,
        } => commands::account::profile(&mut store, name, email, phone, address)?,
        Commands::Products {
            category,
            query,
            featured,
        } => commands::catalog::products(category.as_deref(), &query, featured),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&store, &config.pricing)?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&store, &product_id, quantity)?,
            CartAction::Update {
                product_id,
                quantity,
            } => commands::cart::update(&store, &product_id, quantity)?,
            CartAction::Remove { product_id } => commands::cart::remove(&store, &product_id)?,
            CartAction::Clear => commands::cart::clear(&store)?,
        },
        Commands::Checkout {
            name,
            email,
            address,
            city,
            zip,
            phone,
            card,
            expiry,
            cvv,
        } => {
            let form = commands::orders::CheckoutForm {
                name,
                email,
                address,
                city,
                zip,
                phone,
                card,
                expiry,
                cvv,
            };
            commands::orders::checkout(&store, &config.pricing, form)?;
        }
        Commands::Orders => commands::orders::list(&store)?,
        Commands::Notifications { action } => match action {
            NotificationAction::List => commands::orders::notifications(&store)?,
            NotificationAction::Read { id } => commands::orders::mark_read(&store, &id)?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Dashboard => commands::admin::dashboard(&store)?,
            AdminAction::Orders => commands::admin::orders(&store)?,
            AdminAction::SetStatus { order_id, status } => {
                commands::admin::set_status(&store, &order_id, status)?;
            }
        },
    }

    while let Ok(event) = events.try_recv() {
        debug!(?event, "Store event");
    }
    Ok(())
}
