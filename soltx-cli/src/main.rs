//! Command-line front end for the soltx transaction helpers.
//!
//! # Usage
//!
//! ```bash
//! # Print the public key of a secret key
//! SOLTX_PRIVATE_KEY=... soltx pubkey
//!
//! # Encode an integer as 8 little-endian bytes
//! soltx encode-u64 1000000
//!
//! # Send 0.001 SOL with a priority fee of 5000 micro-lamports per CU
//! soltx transfer --to <PUBKEY> --lamports 1000000 --priority-fee-sol 0.000005
//! ```
//!
//! # Environment Variables
//!
//! - `SOLTX_RPC_URL`: JSON-RPC endpoint (default: mainnet-beta)
//! - `SOLTX_PRIVATE_KEY`: Base58 secret key used by `pubkey` and `transfer`
//! - `RUST_LOG`: Log level filter (default: `info`)
//!
//! Variables are also read from a `.env` file in the working directory.

mod cli;

use clap::Parser;
use solana_signer::Signer;
use solana_system_interface::instruction as system_instruction;
use soltx::{buffer_from_u64, create_transaction, keypair_from_base58, send_and_confirm};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, TransferArgs};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        tracing::error!("soltx failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Pubkey(key) => {
            let keypair = keypair_from_base58(&key.private_key)?;
            output(&keypair.pubkey().to_string());
        }
        Command::EncodeU64 { value } => {
            let bytes = buffer_from_u64(&value)?;
            let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            output(&hex);
        }
        Command::Transfer(args) => {
            let signature = transfer(&cli.rpc_url, args).await?;
            output(&signature);
        }
    }
    Ok(())
}

async fn transfer(
    rpc_url: &str,
    args: TransferArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let config = args.config();
    let payer = keypair_from_base58(&args.key.private_key)?;
    let rpc = config.rpc_client(rpc_url);
    tracing::info!(
        rpc_url,
        from = %payer.pubkey(),
        to = %args.to,
        lamports = args.lamports,
        priority_fee = %args.priority_fee_sol,
        "Submitting transfer"
    );

    let instruction = system_instruction::transfer(&payer.pubkey(), &args.to, args.lamports);
    let transaction = create_transaction(
        &rpc,
        vec![instruction],
        &payer.pubkey(),
        args.priority_fee_sol,
        &config,
    )
    .await?;
    let signature = send_and_confirm(&rpc, transaction, &[&payer], &config).await?;
    Ok(signature.to_string())
}

#[allow(clippy::print_stdout)]
fn output(line: &str) {
    println!("{line}");
}
