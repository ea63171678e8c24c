//! Sending and confirming transactions.
//!
//! [`send_and_confirm`] signs, submits, and waits for a transaction to land,
//! reporting the failure reason as a [`SubmitError`].
//! [`send_and_confirm_or_none`] logs any failure and returns `None` instead.

use std::time::Duration;

use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_commitment_config::CommitmentConfig;
use solana_signature::Signature;
use solana_signer::SignerError;
use solana_signer::signers::Signers;
use solana_transaction::Transaction;

use crate::config::TransactionConfig;
use crate::rpc::{RpcError, SignatureStatus, SolanaRpc};

/// Errors produced while sending or confirming a transaction.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Fetching the confirmation blockhash failed.
    #[error("Failed to fetch confirmation blockhash: {0}")]
    Blockhash(#[source] RpcError),
    /// Signing failed, usually because a required signer is missing.
    #[error("Failed to sign transaction: {0}")]
    Sign(#[from] SignerError),
    /// The node refused or never received the transaction.
    #[error("Failed to send transaction: {0}")]
    Send(#[source] RpcError),
    /// The transaction landed but failed on chain.
    #[error("Transaction {signature} failed: {reason}")]
    Rejected {
        /// Signature of the failed transaction.
        signature: Signature,
        /// Transaction error reported by the node.
        reason: String,
    },
    /// The blockhash expired before the transaction was seen.
    #[error(
        "Transaction {signature} expired: block height {block_height} exceeds last valid height {last_valid_block_height}"
    )]
    Expired {
        /// Signature of the expired transaction.
        signature: Signature,
        /// Block height observed when giving up.
        block_height: u64,
        /// Last block height at which the blockhash was valid.
        last_valid_block_height: u64,
    },
    /// Confirmation did not complete in time.
    #[error("Timed out after {timeout:?} waiting for transaction {signature}")]
    Timeout {
        /// Signature of the unconfirmed transaction.
        signature: Signature,
        /// Configured confirmation timeout.
        timeout: Duration,
    },
}

impl SubmitError {
    /// Returns the signature when the transaction reached the node.
    #[must_use]
    pub const fn signature(&self) -> Option<&Signature> {
        match self {
            Self::Rejected { signature, .. }
            | Self::Expired { signature, .. }
            | Self::Timeout { signature, .. } => Some(signature),
            Self::Blockhash(_) | Self::Sign(_) | Self::Send(_) => None,
        }
    }
}

/// Signs, sends, and confirms `transaction`.
///
/// 1. Fetches a blockhash at [`TransactionConfig::confirm_commitment`] to
///    obtain the last valid block height for expiry tracking. This is not the
///    blockhash the transaction carries: at the default `processed` level
///    its height runs a few dozen blocks past the finalized one, so expiry
///    may be reported late. Set `confirm_commitment` to `finalized` to track
///    the stamped blockhash exactly.
/// 2. Signs the transaction against its own recent blockhash.
/// 3. Submits it with the configured preflight settings.
/// 4. Polls the signature status until it lands, fails, expires, or
///    [`TransactionConfig::confirm_timeout`] elapses.
///
/// # Errors
///
/// Returns [`SubmitError`] naming the step that failed.
pub async fn send_and_confirm<R, T>(
    rpc: &R,
    mut transaction: Transaction,
    signers: &T,
    config: &TransactionConfig,
) -> Result<Signature, SubmitError>
where
    R: SolanaRpc + ?Sized,
    T: Signers + Sync + ?Sized,
{
    let commitment: CommitmentConfig = config.confirm_commitment.into();
    let (_, last_valid_block_height) = rpc
        .latest_blockhash(commitment)
        .await
        .map_err(SubmitError::Blockhash)?;

    let recent_blockhash = transaction.message.recent_blockhash;
    transaction.try_sign(signers, recent_blockhash)?;

    let send_config = RpcSendTransactionConfig {
        skip_preflight: config.skip_preflight,
        preflight_commitment: Some(config.preflight_commitment.level()),
        ..RpcSendTransactionConfig::default()
    };
    let signature = rpc
        .send_transaction(&transaction, send_config)
        .await
        .map_err(SubmitError::Send)?;
    tracing::info!(signature = %signature, "Transaction sent");

    let wait = wait_for_landing(rpc, &signature, last_valid_block_height, config);
    let outcome = tokio::time::timeout(config.confirm_timeout, wait).await;
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(e),
        Err(_) => {
            return Err(SubmitError::Timeout {
                signature,
                timeout: config.confirm_timeout,
            });
        }
    }

    tracing::info!(
        signature = %signature,
        commitment = %config.confirm_commitment,
        "Transaction confirmed"
    );
    Ok(signature)
}

/// Like [`send_and_confirm`], but logs any failure and returns `None`.
///
/// A transaction that lands but fails on chain still returns its signature,
/// with the reason logged at `warn`. Callers that need to tell network
/// failures, rejections, and expiry apart should use [`send_and_confirm`].
pub async fn send_and_confirm_or_none<R, T>(
    rpc: &R,
    transaction: Transaction,
    signers: &T,
    config: &TransactionConfig,
) -> Option<Signature>
where
    R: SolanaRpc + ?Sized,
    T: Signers + Sync + ?Sized,
{
    match send_and_confirm(rpc, transaction, signers, config).await {
        Ok(signature) => Some(signature),
        Err(SubmitError::Rejected { signature, reason }) => {
            tracing::warn!(
                signature = %signature,
                reason = %reason,
                "Transaction landed with an error"
            );
            Some(signature)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error sending or confirming transaction");
            None
        }
    }
}

/// Polls until the signature lands, fails, or the blockhash expires.
///
/// Polling errors are logged and retried; the caller bounds the loop with a
/// timeout.
async fn wait_for_landing<R: SolanaRpc + ?Sized>(
    rpc: &R,
    signature: &Signature,
    last_valid_block_height: u64,
    config: &TransactionConfig,
) -> Result<(), SubmitError> {
    let commitment: CommitmentConfig = config.confirm_commitment.into();
    loop {
        match rpc.signature_status(signature, commitment).await {
            Ok(SignatureStatus::Landed) => return Ok(()),
            Ok(SignatureStatus::Failed(reason)) => {
                return Err(SubmitError::Rejected {
                    signature: *signature,
                    reason,
                });
            }
            Ok(SignatureStatus::Pending) => {}
            Err(e) => {
                tracing::warn!(signature = %signature, error = %e, "Signature status poll failed");
            }
        }

        match rpc.block_height(commitment).await {
            Ok(block_height) if block_height > last_valid_block_height => {
                return Err(SubmitError::Expired {
                    signature: *signature,
                    block_height,
                    last_valid_block_height,
                });
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(signature = %signature, error = %e, "Block height poll failed");
            }
        }

        tokio::time::sleep(config.poll_interval).await;
    }
}
