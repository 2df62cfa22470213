//! financeai - FinanceAI sign-in from the terminal
//!
//! # Examples
//!
//! ```bash
//! # Email and password (password read from stdin when --password is omitted)
//! financeai login --email ada@example.com
//!
//! # Phone wallet via QR code; Ctrl-C cancels
//! financeai wallet qr --pretty
//!
//! # Who is signed in?
//! financeai status
//! ```

use fa_cli::commands::Commands;
use fa_cli::output::{error_line, render};
use fa_cli::wallet_commands::WalletCommands;
use fa_cli::{AppContext, Cli, CliResult, handlers, logger};
use fa_config::Config;

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{e}");
            eprintln!("{}", error_line(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = Config::load()?;
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;
    if config.logging.level.0 >= LevelFilter::Debug {
        config.log_summary();
    }

    let ctx = AppContext::new(config, cli.server.as_deref())?;

    let value = match cli.command {
        Commands::Login { email, password } => handlers::login(&ctx, &email, password).await?,
        Commands::Register {
            name,
            email,
            password,
            risk_appetite,
            experience_level,
        } => {
            handlers::register(&ctx, name, email, password, risk_appetite, experience_level)
                .await?
        }
        Commands::Logout => handlers::logout(&ctx).await?,
        Commands::Status => handlers::status(&ctx),
        Commands::SetUsername { username } => handlers::set_username(&ctx, &username).await?,
        Commands::Wallet { action } => match action {
            WalletCommands::Connect { provider_url } => {
                handlers::wallet_connect(&ctx, provider_url.as_deref()).await?
            }
            WalletCommands::Qr {
                project_id,
                relay_url,
            } => handlers::wallet_qr(&ctx, project_id, relay_url.as_deref()).await?,
        },
    };

    println!("{}", render(&value, cli.pretty)?);
    Ok(())
}
