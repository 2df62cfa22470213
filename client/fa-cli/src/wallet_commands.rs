use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum WalletCommands {
    /// Sign in with a wallet reachable over JSON-RPC
    Connect {
        /// Wallet JSON-RPC endpoint (overrides wallet.provider_url)
        #[arg(long)]
        provider_url: Option<String>,
    },

    /// Sign in by scanning a QR code with a phone wallet
    Qr {
        /// Relay project id (overrides wallet.project_id)
        #[arg(long)]
        project_id: Option<String>,
        /// Relay bridge URL (overrides wallet.relay_url)
        #[arg(long)]
        relay_url: Option<String>,
    },
}
