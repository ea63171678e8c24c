//! Command-line arguments.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use solana_pubkey::Pubkey;
use soltx::{DEFAULT_COMPUTE_UNIT_LIMIT, PriorityFee, TransactionConfig};

/// Default cluster endpoint.
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Build, sign, and submit Solana transactions.
#[derive(Debug, Parser)]
#[command(name = "soltx", version, about)]
pub struct Cli {
    /// JSON-RPC endpoint of the cluster.
    #[arg(long, env = "SOLTX_RPC_URL", default_value = DEFAULT_RPC_URL, global = true)]
    pub rpc_url: String,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the public key of a base58 secret key.
    Pubkey(KeyArgs),
    /// Print the 8-byte little-endian encoding of an unsigned integer.
    EncodeU64 {
        /// Decimal or 0x-prefixed hexadecimal value.
        value: String,
    },
    /// Transfer lamports with an optional priority fee.
    Transfer(TransferArgs),
}

/// Secret key source.
#[derive(Debug, Args)]
pub struct KeyArgs {
    /// Base58-encoded 64-byte secret key.
    #[arg(long = "key", env = "SOLTX_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

/// Arguments of the `transfer` subcommand.
#[derive(Debug, Args)]
pub struct TransferArgs {
    /// Payer and sender.
    #[command(flatten)]
    pub key: KeyArgs,

    /// Recipient address.
    #[arg(long)]
    pub to: Pubkey,

    /// Amount to send in lamports.
    #[arg(long)]
    pub lamports: u64,

    /// Priority fee in SOL per compute unit (e.g. 0.000005).
    #[arg(long, default_value = "0")]
    pub priority_fee_sol: PriorityFee,

    /// Compute unit limit.
    #[arg(long, default_value_t = DEFAULT_COMPUTE_UNIT_LIMIT)]
    pub compute_unit_limit: u32,

    /// Seconds to wait for confirmation.
    #[arg(long, default_value_t = 60)]
    pub confirm_timeout_secs: u64,
}

impl TransferArgs {
    /// Builds the transaction config from the flags.
    #[must_use]
    pub fn config(&self) -> TransactionConfig {
        TransactionConfig::default()
            .with_compute_unit_limit(self.compute_unit_limit)
            .with_confirm_timeout(Duration::from_secs(self.confirm_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_transfer() {
        let to = Pubkey::new_unique();
        let cli = Cli::try_parse_from([
            "soltx",
            "--rpc-url",
            "http://localhost:8899",
            "transfer",
            "--key",
            "abc",
            "--to",
            &to.to_string(),
            "--lamports",
            "1000",
            "--priority-fee-sol",
            "0.000005",
        ])
        .unwrap();

        assert_eq!(cli.rpc_url, "http://localhost:8899");
        let Command::Transfer(args) = cli.command else {
            panic!("expected transfer");
        };
        assert_eq!(args.to, to);
        assert_eq!(args.lamports, 1000);
        assert_eq!(args.priority_fee_sol.micro_lamports(), 5000);
        assert_eq!(args.config().compute_unit_limit, DEFAULT_COMPUTE_UNIT_LIMIT);
    }

    #[test]
    fn test_parse_rejects_negative_fee() {
        let result = Cli::try_parse_from([
            "soltx",
            "transfer",
            "--key",
            "abc",
            "--to",
            &Pubkey::new_unique().to_string(),
            "--lamports",
            "1",
            "--priority-fee-sol",
            "-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_encode_u64() {
        let cli = Cli::try_parse_from(["soltx", "encode-u64", "42"]).unwrap();
        assert!(matches!(cli.command, Command::EncodeU64 { ref value } if value == "42"));
    }
}
