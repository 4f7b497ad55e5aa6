use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pdfshelf_core::ClientConfig;
use tracing_subscriber::EnvFilter;

mod commands;
mod ui;

use commands::Context;
use commands::auth::{self, RegisterArgs};
use commands::files::FileCommands;
use commands::shared::SharedCommands;
use commands::users::UserCommands;

#[derive(Parser)]
#[command(name = "pdfshelf")]
#[command(about = "Manage, share and download your PDF files", long_about = None)]
struct Cli {
    /// API base URL, overrides PDFSHELF_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Directory holding the stored session, overrides PDFSHELF_STORAGE_DIR
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,
    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,
    /// Print lists as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Your PDF files
    #[command(subcommand)]
    Files(FileCommands),
    /// Files opened through a share link
    #[command(subcommand)]
    Shared(SharedCommands),
    /// User administration
    #[command(subcommand)]
    Users(UserCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    let ctx = Context::new(config, cli.yes, cli.json)?;

    match cli.command {
        Commands::Login { email, password } => auth::run_login(&ctx, &email, &password).await?,
        Commands::Register(args) => auth::run_register(&ctx, args).await?,
        Commands::Logout => auth::run_logout(&ctx)?,
        Commands::Whoami => auth::run_whoami(&ctx).await?,
        Commands::Files(cmd) => commands::files::run(&ctx, cmd).await?,
        Commands::Shared(cmd) => commands::shared::run(&ctx, cmd).await?,
        Commands::Users(cmd) => commands::users::run(&ctx, cmd).await?,
    }

    Ok(())
}
