//! TomatoMall CLI - browse and shop from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (the session is kept in .tomato-mall-session.json)
//! tm-cli login alice --password secret
//!
//! # Browse
//! tm-cli products list
//! tm-cli products show 3
//!
//! # Shop
//! tm-cli cart add 3 --quantity 2
//! tm-cli cart checkout 1 2 --name Alice --location Nanjing --telephone 138 --email a@b.c
//! tm-cli orders pay 7
//!
//! # Messages and views
//! tm-cli inbox
//! tm-cli view /warehouse
//! ```
//!
//! Set `RUST_LOG=tomato_mall_client=debug` to see each request.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tomato_mall_client::models::OrderInfo;
use tomato_mall_core::{CartItemId, CouponId, MessageId, OrderId, ProductId, ShopId};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "tm-cli")]
#[command(author, version, about = "TomatoMall command-line client")]
struct Cli {
    /// Session file (default: $TOMATO_MALL_SESSION_FILE or .tomato-mall-session.json)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Browse products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// List shops
    Shops,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Show received messages
    Inbox,
    /// Mark a message read
    Read { id: MessageId },
    /// Coupons on offer or held
    Coupons {
        #[command(subcommand)]
        action: CouponsAction,
    },
    /// Upload an image and print its URL
    Upload {
        path: PathBuf,

        /// Upload as the account avatar
        #[arg(long)]
        avatar: bool,
    },
    /// Check whether a client view is reachable with the current session
    View { path: String },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, optionally for one shop
    List {
        #[arg(long)]
        shop: Option<ShopId>,
    },
    /// Show a product with its stock
    Show { id: ProductId },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        product: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a line's quantity
    Update { item: CartItemId, quantity: u32 },
    /// Remove a line
    Remove { item: CartItemId },
    /// Place an order for cart lines
    Checkout {
        #[arg(required = true)]
        items: Vec<CartItemId>,

        #[arg(long)]
        name: String,

        #[arg(long)]
        location: String,

        #[arg(long)]
        telephone: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "Alipay")]
        payment_method: String,

        /// Coupon to apply
        #[arg(long)]
        coupon: Option<CouponId>,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List your orders
    List,
    /// Show an order's lines
    Items { id: OrderId },
    /// Start payment for an order
    Pay { id: OrderId },
    /// Cancel an unpaid order
    Cancel { id: OrderId },
}

#[derive(Subcommand)]
enum CouponsAction {
    /// Coupons on offer
    List,
    /// Coupons you hold
    Mine,
    /// Claim a coupon
    Receive {
        id: CouponId,

        #[arg(short, long, default_value_t = 1)]
        quantity: i32,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tomato_mall_client=info,tomato_mall_cli=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        // A rejected session has already been reported by the redirect
        if !e.is_suppressed() {
            tracing::error!("{e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let session_path = commands::session_file(cli.session_file);
    let client = commands::connect(&session_path)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::account::login(&client, &username, SecretString::from(password)).await?;
        }
        Commands::Logout => commands::account::logout(&client)?,
        Commands::Whoami => commands::account::whoami(&client).await?,
        Commands::Products { action } => match action {
            ProductsAction::List { shop } => commands::catalog::list_products(&client, shop).await?,
            ProductsAction::Show { id } => commands::catalog::show_product(&client, id).await?,
        },
        Commands::Shops => commands::catalog::list_shops(&client).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::purchase::show_cart(&client).await?,
            CartAction::Add { product, quantity } => {
                commands::purchase::add(&client, product, quantity).await?;
            }
            CartAction::Update { item, quantity } => {
                commands::purchase::update(&client, item, quantity).await?;
            }
            CartAction::Remove { item } => commands::purchase::remove(&client, item).await?,
            CartAction::Checkout {
                items,
                name,
                location,
                telephone,
                email,
                payment_method,
                coupon,
            } => {
                let info = OrderInfo {
                    name,
                    location,
                    telephone,
                    email,
                };
                commands::purchase::checkout(&client, items, info, payment_method, coupon).await?;
            }
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::purchase::list_orders(&client).await?,
            OrdersAction::Items { id } => commands::purchase::order_items(&client, id).await?,
            OrdersAction::Pay { id } => commands::purchase::pay(&client, id).await?,
            OrdersAction::Cancel { id } => commands::purchase::cancel(&client, id).await?,
        },
        Commands::Inbox => commands::inbox::show(&client).await?,
        Commands::Read { id } => commands::inbox::mark_read(&client, id).await?,
        Commands::Coupons { action } => match action {
            CouponsAction::List => commands::catalog::list_coupons(&client, false).await?,
            CouponsAction::Mine => commands::catalog::list_coupons(&client, true).await?,
            CouponsAction::Receive { id, quantity } => {
                commands::catalog::receive_coupon(&client, id, quantity).await?;
            }
        },
        Commands::Upload { path, avatar } => {
            commands::catalog::upload(&client, &path, avatar).await?;
        }
        Commands::View { path } => commands::views::check(&client, &path)?,
    }
    Ok(())
}
