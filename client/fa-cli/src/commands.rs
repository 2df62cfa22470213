use crate::wallet_commands::WalletCommands;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// First word becomes the first name, the rest the last name
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        risk_appetite: Option<String>,
        #[arg(long)]
        experience_level: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show whether a session is stored and who it belongs to
    Status,

    /// Choose a username (3-30 letters, digits or underscores)
    SetUsername { username: String },

    /// Wallet sign-in
    Wallet {
        #[command(subcommand)]
        action: WalletCommands,
    },
}
