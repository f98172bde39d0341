//! Bramblefig CLI - command-line storefront interface.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! bf-cli products list --page 1 --keyword walnut
//! bf-cli products show 7
//!
//! # Manage the cart
//! bf-cli cart add 7 --qty 2
//! bf-cli cart show
//!
//! # Authenticate
//! bf-cli auth login --email fern@example.com --password '...'
//!
//! # Check out
//! bf-cli checkout shipping --address "1 Fig Lane" --city Portland \
//!     --postal-code 97201 --country USA
//! bf-cli checkout payment --method PayPal
//! bf-cli checkout place
//!
//! # Admin
//! bf-cli admin users
//! ```
//!
//! # Environment Variables
//!
//! - `BRAMBLEFIG_API_BASE_URL` - shop backend base URL
//! - `BRAMBLEFIG_STATE_DIR` - directory for persisted cart/session state
//! - `RUST_LOG` - tracing filter (default `bramblefig=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]
// Tables and receipts are the CLI's product; they belong on stdout.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use bramblefig_client::error::ClientError;
use bramblefig_client::state::Storefront;
use bramblefig_core::PaymentMethod;

mod commands;

#[derive(Parser)]
#[command(name = "bf-cli")]
#[command(author, version, about = "Bramblefig storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Log in, register, and manage the profile
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Walk the checkout flow
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
    /// View and pay orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Admin-only user management
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products, optionally filtered
    List {
        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Search keyword
        #[arg(short, long)]
        keyword: Option<String>,

        /// Category filter
        #[arg(short, long)]
        category: Option<String>,

        /// Cap the number of results
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show one product with its reviews
    Show {
        /// Product id
        id: String,
    },
    /// List the available categories
    Categories,
    /// Submit a review
    Review {
        /// Product id
        id: String,

        /// Star rating, 1-5
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=5))]
        rating: u32,

        /// Review text
        #[arg(short, long)]
        comment: String,
    },
    /// Delete one of your reviews
    DeleteReview {
        /// Product id
        id: String,

        /// Review id
        review_id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with its summary totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        qty: u32,
    },
    /// Set a line's quantity
    SetQty {
        /// Product id
        id: String,

        /// New quantity (minimum 1; use `remove` to drop a line)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        qty: u32,
    },
    /// Remove a line from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Toggle a product in the favorites list
    Toggle {
        /// Product id
        id: String,
    },
    /// List favorites
    List,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Drop the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Update the profile (name and/or password)
    Update {
        #[arg(short, long)]
        name: Option<String>,

        /// New password; omit to keep the current one
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Stage the shipping address
    Shipping {
        #[arg(long)]
        address: String,

        #[arg(long)]
        city: String,

        #[arg(long)]
        postal_code: String,

        #[arg(long)]
        country: String,
    },
    /// Choose the payment method
    Payment {
        /// `PayPal` or `CreditCard`
        #[arg(short, long)]
        method: PaymentMethod,
    },
    /// Show the order review
    Review,
    /// Place the order
    Place,
}

#[derive(Subcommand)]
enum OrderAction {
    /// List your orders
    List,
    /// Show one order
    Show {
        /// Order id
        id: String,
    },
    /// Mark an order as paid
    Pay {
        /// Order id
        id: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List all users
    Users,
    /// Delete a user
    DeleteUser {
        /// User id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter; defaults to info for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bramblefig=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let storefront = Storefront::from_env()?;

    let result = dispatch(&storefront, cli.command).await;

    // The client never detects token expiry on its own; a rejection is the
    // signal to treat the user as logged out.
    if let Err(e) = &result
        && e.is_auth_rejection()
        && storefront.session().is_logged_in()
    {
        storefront.logout();
        println!("Your session was rejected by the server; you have been logged out.");
        println!("Run `bf-cli auth login` and try again.");
    }

    result
}

async fn dispatch(storefront: &Storefront, command: Commands) -> Result<(), ClientError> {
    match command {
        Commands::Products { action } => match action {
            ProductAction::List {
                page,
                keyword,
                category,
                limit,
            } => commands::products::list(storefront, page, keyword, category, limit).await,
            ProductAction::Show { id } => commands::products::show(storefront, &id).await,
            ProductAction::Categories => commands::products::categories(storefront).await,
            ProductAction::Review {
                id,
                rating,
                comment,
            } => commands::products::review(storefront, &id, rating, comment).await,
            ProductAction::DeleteReview { id, review_id } => {
                commands::products::delete_review(storefront, &id, &review_id).await
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(storefront),
            CartAction::Add { id, qty } => commands::cart::add(storefront, &id, qty).await,
            CartAction::SetQty { id, qty } => commands::cart::set_qty(storefront, &id, qty),
            CartAction::Remove { id } => commands::cart::remove(storefront, &id),
            CartAction::Clear => commands::cart::clear(storefront),
        },
        Commands::Favorites { action } => match action {
            FavoriteAction::Toggle { id } => commands::favorites::toggle(storefront, &id).await,
            FavoriteAction::List => commands::favorites::list(storefront),
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(storefront, &email, &password).await
            }
            AuthAction::Register {
                name,
                email,
                password,
            } => commands::auth::register(storefront, &name, &email, &password).await,
            AuthAction::Logout => commands::auth::logout(storefront),
            AuthAction::Whoami => commands::auth::whoami(storefront),
            AuthAction::Update { name, password } => {
                commands::auth::update(storefront, name, password).await
            }
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Shipping {
                address,
                city,
                postal_code,
                country,
            } => commands::checkout::shipping(storefront, address, city, postal_code, country),
            CheckoutAction::Payment { method } => commands::checkout::payment(storefront, method),
            CheckoutAction::Review => commands::checkout::review(storefront),
            CheckoutAction::Place => commands::checkout::place(storefront).await,
        },
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list(storefront).await,
            OrderAction::Show { id } => commands::orders::show(storefront, &id).await,
            OrderAction::Pay { id } => commands::orders::pay(storefront, &id).await,
        },
        Commands::Admin { action } => match action {
            AdminAction::Users => commands::admin::users(storefront).await,
            AdminAction::DeleteUser { id, yes } => {
                commands::admin::delete_user(storefront, &id, yes).await
            }
        },
    }
}
