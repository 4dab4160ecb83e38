//! RocketCart CLI - Command line shopping cart for the RocketShoes storefront.
//!
//! Commands:
//! - `rocket-cart show` - Show the cart
//! - `rocket-cart add` - Add one unit of a product
//! - `rocket-cart remove` - Remove a product
//! - `rocket-cart update` - Set the amount of a product
//! - `rocket-cart clear` - Empty the cart
//! - `rocket-cart config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, ClearArgs, ConfigArgs, RemoveArgs, UpdateArgs};

/// RocketCart - Stock-checked shopping cart for the RocketShoes storefront
#[derive(Parser)]
#[command(name = "rocket-cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Serve stock and products from a local JSON database instead of the API
    #[arg(long, global = true)]
    fixture: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show,

    /// Add one unit of a product
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Set the amount of a product already in the cart
    Update(UpdateArgs),

    /// Empty the cart
    Clear(ClearArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), cli.fixture.as_deref(), output.clone())
    {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    // Execute command
    let result: Result<ExitCode> = match cli.command {
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Update(args) => commands::cart::update(args, &ctx).await,
        Commands::Clear(args) => commands::cart::clear(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx)
            .await
            .map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
