#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Helpers for building, signing, and submitting Solana transactions.
//!
//! The crate is a thin layer over the Solana SDK crates. Each operation is
//! independent and can be composed freely by the caller.
//!
//! # Modules
//!
//! - [`keypair`] - Base58 secret key decoding
//! - [`encoding`] - Fixed-width little-endian `u64` encoding
//! - [`fee`] - Priority fee conversion from SOL to micro-lamports
//! - [`config`] - Compute budget, commitment, and timeout configuration
//! - [`rpc`] - RPC abstraction over the nonblocking Solana client
//! - [`builder`] - Transaction assembly with compute budget instructions
//! - [`submit`] - Sending and confirming signed transactions
//! - [`error`] - Crate-wide error aggregate
//!
//! # Example
//!
//! ```ignore
//! use soltx::{PriorityFee, TransactionConfig, create_transaction, keypair_from_base58, send_and_confirm};
//! use solana_signer::Signer;
//!
//! let config = TransactionConfig::default();
//! let rpc = config.rpc_client("https://api.mainnet-beta.solana.com");
//! let payer = keypair_from_base58(&std::env::var("PRIVATE_KEY")?)?;
//!
//! let fee = PriorityFee::from_sol_str("0.000005")?;
//! let tx = create_transaction(&rpc, instructions, &payer.pubkey(), fee, &config).await?;
//! let signature = send_and_confirm(&rpc, tx, &[&payer], &config).await?;
//! ```

pub mod builder;
pub mod config;
pub mod encoding;
pub mod error;
pub mod fee;
pub mod keypair;
pub mod rpc;
pub mod submit;

#[cfg(test)]
mod testing;

pub use builder::{
    BuildError, TransactionBuilder, compose_instructions, compute_budget_instructions,
    create_transaction,
};
pub use config::{Commitment, DEFAULT_COMPUTE_UNIT_LIMIT, TransactionConfig};
pub use encoding::{EncodeError, U64Input, buffer_from_u64, u64_from_buffer};
pub use error::Error;
pub use fee::{FeeError, MICRO_LAMPORTS_PER_SOL, PriorityFee};
pub use keypair::{KeypairError, keypair_from_base58, keypair_to_base58};
pub use rpc::{RpcError, SignatureStatus, SolanaRpc};
pub use submit::{SubmitError, send_and_confirm, send_and_confirm_or_none};
