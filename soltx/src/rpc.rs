//! RPC abstraction over the nonblocking Solana client.
//!
//! [`SolanaRpc`] covers exactly the calls the builder and submitter need.
//! It is implemented for [`RpcClient`] and for `Arc<T>`, and tests provide
//! scripted implementations.

use std::sync::Arc;

use async_trait::async_trait;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_commitment_config::CommitmentConfig;
use solana_message::Hash;
use solana_signature::Signature;
use solana_transaction::Transaction;

/// Errors returned by [`SolanaRpc`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Error reported by the Solana RPC client.
    #[error(transparent)]
    Client(Box<ClientError>),
    /// Any other transport failure.
    #[error("{0}")]
    Custom(String),
}

impl From<ClientError> for RpcError {
    fn from(e: ClientError) -> Self {
        Self::Client(Box::new(e))
    }
}

/// Observed state of a submitted signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureStatus {
    /// Not yet seen at the requested commitment.
    Pending,
    /// Landed successfully at the requested commitment.
    Landed,
    /// Landed but the transaction failed on chain.
    Failed(String),
}

/// The subset of Solana JSON-RPC used to assemble and submit transactions.
#[async_trait]
pub trait SolanaRpc: Send + Sync {
    /// Returns the latest blockhash and the last block height at which it is valid.
    async fn latest_blockhash(
        &self,
        commitment: CommitmentConfig,
    ) -> Result<(Hash, u64), RpcError>;

    /// Submits a signed transaction and returns its signature.
    async fn send_transaction(
        &self,
        transaction: &Transaction,
        config: RpcSendTransactionConfig,
    ) -> Result<Signature, RpcError>;

    /// Returns the status of `signature` at `commitment`.
    async fn signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, RpcError>;

    /// Returns the current block height at `commitment`.
    async fn block_height(&self, commitment: CommitmentConfig) -> Result<u64, RpcError>;
}

#[async_trait]
impl SolanaRpc for RpcClient {
    async fn latest_blockhash(
        &self,
        commitment: CommitmentConfig,
    ) -> Result<(Hash, u64), RpcError> {
        Ok(self.get_latest_blockhash_with_commitment(commitment).await?)
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
        config: RpcSendTransactionConfig,
    ) -> Result<Signature, RpcError> {
        Ok(self.send_transaction_with_config(transaction, config).await?)
    }

    async fn signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, RpcError> {
        let status = self
            .get_signature_status_with_commitment(signature, commitment)
            .await?;
        Ok(match status {
            None => SignatureStatus::Pending,
            Some(Ok(())) => SignatureStatus::Landed,
            Some(Err(e)) => SignatureStatus::Failed(e.to_string()),
        })
    }

    async fn block_height(&self, commitment: CommitmentConfig) -> Result<u64, RpcError> {
        Ok(self.get_block_height_with_commitment(commitment).await?)
    }
}

#[async_trait]
impl<T: SolanaRpc + ?Sized> SolanaRpc for Arc<T> {
    async fn latest_blockhash(
        &self,
        commitment: CommitmentConfig,
    ) -> Result<(Hash, u64), RpcError> {
        (**self).latest_blockhash(commitment).await
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
        config: RpcSendTransactionConfig,
    ) -> Result<Signature, RpcError> {
        (**self).send_transaction(transaction, config).await
    }

    async fn signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, RpcError> {
        (**self).signature_status(signature, commitment).await
    }

    async fn block_height(&self, commitment: CommitmentConfig) -> Result<u64, RpcError> {
        (**self).block_height(commitment).await
    }
}
