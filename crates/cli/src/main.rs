//! Merchstand CLI - a command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! merch catalog list --category anime --sort price-low
//!
//! # Create an account and shop
//! merch account register -n "Ada Lovelace" -e ada@example.com -p secret1
//! merch cart add 1 --size L --quantity 2
//! merch checkout --address "1 Main St" --city Springfield --state IL \
//!     --zip 62701 --country US
//!
//! # Follow up on orders
//! merch orders list
//! merch inbox
//! ```
//!
//! State lives as JSON files under the configured data directory
//! (`MERCHSTAND_DATA_DIR`, default `.merchstand`), so commands compose
//! across invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use merchstand_storefront::config::StorefrontConfig;
use merchstand_storefront::shop::Shop;

mod commands;

#[derive(Parser)]
#[command(name = "merch")]
#[command(author, version, about = "Merchstand command-line storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Account registration and sign-in
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Manage the signed-in user's address book
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Place an order for the current cart
    Checkout {
        /// Recipient name (defaults to the signed-in user's name)
        #[arg(long)]
        name: Option<String>,

        /// Contact email (defaults to the signed-in user's email)
        #[arg(long)]
        email: Option<String>,

        /// Street address (defaults to the user's default address)
        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        state: Option<String>,

        #[arg(long)]
        zip: Option<String>,

        #[arg(long)]
        country: Option<String>,

        /// Optional contact phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Inspect and manage orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Read the signed-in user's inbox
    Inbox,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally filtered and sorted
    List {
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Only these categories (`anime`, `movies`, `memes`)
        #[arg(short, long)]
        category: Vec<String>,

        /// Only products at or below this price
        #[arg(long)]
        max_price: Option<String>,

        /// Sort order (`price-low`, `price-high`, `name-asc`, `name-desc`)
        #[arg(long)]
        sort: Option<String>,
    },
    /// Show one product with its related products
    Show {
        /// Product id
        id: u32,
    },
    /// List the featured products
    Featured,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product id
        product: u32,

        /// Size (defaults to the product's first listed size)
        #[arg(short, long)]
        size: Option<String>,

        /// Quantity, 1 to 10
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Color (defaults to the product's first listed color)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Change a cart line's quantity
    SetQuantity {
        /// Cart line id
        line: String,

        /// New quantity, 1 to 10
        quantity: u32,
    },
    /// Remove a cart line by its line id
    Remove {
        /// Cart line id
        line: String,
    },
    /// Show the cart contents
    List,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Change the signed-in user's password
    ChangePassword {
        /// Current password
        #[arg(long)]
        current: String,

        /// New password
        #[arg(long)]
        new: String,
    },
    /// Update the signed-in user's name and email
    Update {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// Save a new address
    Add {
        /// Recipient name
        #[arg(long)]
        name: String,

        /// Street address
        #[arg(long)]
        address: String,

        #[arg(long)]
        city: String,

        #[arg(long)]
        state: String,

        #[arg(long)]
        zip: String,

        #[arg(long)]
        country: String,

        /// Optional contact phone number
        #[arg(long)]
        phone: Option<String>,

        /// Make this the default address
        #[arg(long)]
        default: bool,
    },
    /// List saved addresses
    List,
    /// Delete a saved address
    Remove {
        /// Address id
        id: String,
    },
    /// Mark a saved address as the default
    SetDefault {
        /// Address id
        id: String,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, newest first
    List {
        /// Only orders in this status
        #[arg(short, long)]
        status: Option<String>,

        /// Only the signed-in user's orders
        #[arg(long)]
        mine: bool,
    },
    /// Show one order in full
    Show {
        /// Order id
        id: String,
    },
    /// Set an order's status
    SetStatus {
        /// Order id
        id: String,

        /// New status (`pending`, `processing`, `shipped`, `delivered`, `cancelled`)
        status: String,
    },
    /// Spending statistics for the signed-in user
    Stats,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let result: Result<(), Box<dyn std::error::Error>> = run(Cli::parse());

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let shop = Shop::open(StorefrontConfig::from_env()?)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                search,
                category,
                max_price,
                sort,
            } => commands::catalog::list(&shop, search, &category, max_price, sort)?,
            CatalogAction::Show { id } => commands::catalog::show(&shop, id)?,
            CatalogAction::Featured => commands::catalog::featured(&shop),
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                product,
                size,
                quantity,
                color,
            } => commands::cart::add(&shop, product, size.as_deref(), quantity, color.as_deref())?,
            CartAction::SetQuantity { line, quantity } => {
                commands::cart::set_quantity(&shop, &line, quantity)?;
            }
            CartAction::Remove { line } => commands::cart::remove(&shop, &line)?,
            CartAction::List => commands::cart::list(&shop)?,
            CartAction::Clear => commands::cart::clear(&shop)?,
        },
        Commands::Account { action } => match action {
            AccountAction::Register {
                name,
                email,
                password,
            } => commands::account::register(&shop, &name, &email, &password)?,
            AccountAction::Login { email, password } => {
                commands::account::login(&shop, &email, &password)?;
            }
            AccountAction::Logout => commands::account::logout(&shop)?,
            AccountAction::Whoami => commands::account::whoami(&shop)?,
            AccountAction::ChangePassword { current, new } => {
                commands::account::change_password(&shop, &current, &new)?;
            }
            AccountAction::Update { name, email } => {
                commands::account::update(&shop, &name, &email)?;
            }
        },
        Commands::Address { action } => match action {
            AddressAction::Add {
                name,
                address,
                city,
                state,
                zip,
                country,
                phone,
                default,
            } => commands::address::add(
                &shop,
                merchstand_storefront::services::AddressInput {
                    name,
                    address,
                    city,
                    state,
                    zip,
                    country,
                    phone,
                    make_default: default,
                },
            )?,
            AddressAction::List => commands::address::list(&shop)?,
            AddressAction::Remove { id } => commands::address::remove(&shop, &id)?,
            AddressAction::SetDefault { id } => commands::address::set_default(&shop, &id)?,
        },
        Commands::Checkout {
            name,
            email,
            address,
            city,
            state,
            zip,
            country,
            phone,
        } => commands::checkout::place(
            &shop,
            commands::checkout::FormOverrides {
                name,
                email,
                address,
                city,
                state,
                zip,
                country,
                phone,
            },
        )?,
        Commands::Orders { action } => match action {
            OrdersAction::List { status, mine } => {
                commands::orders::list(&shop, status.as_deref(), mine)?;
            }
            OrdersAction::Show { id } => commands::orders::show(&shop, &id)?,
            OrdersAction::SetStatus { id, status } => {
                commands::orders::set_status(&shop, &id, &status)?;
            }
            OrdersAction::Stats => commands::orders::stats(&shop)?,
        },
        Commands::Inbox => commands::inbox::list(&shop)?,
    }
    Ok(())
}
