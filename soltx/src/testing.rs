//! Scripted [`SolanaRpc`] implementation for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_commitment_config::CommitmentConfig;
use solana_message::Hash;
use solana_signature::Signature;
use solana_transaction::Transaction;

use crate::rpc::{RpcError, SignatureStatus, SolanaRpc};

/// Mock RPC with configurable responses and call recording.
#[derive(Debug)]
pub struct MockRpc {
    /// Blockhash and last valid block height returned by `latest_blockhash`.
    pub blockhash: Result<(Hash, u64), String>,
    /// Return value of `send_transaction`.
    pub send_result: Result<Signature, String>,
    /// Statuses returned in order; the last one repeats.
    pub statuses: Mutex<VecDeque<Result<SignatureStatus, String>>>,
    /// Block height returned by `block_height`.
    pub block_height: u64,
    /// Commitments passed to `latest_blockhash`, in call order.
    pub blockhash_calls: Mutex<Vec<CommitmentConfig>>,
    /// Transactions and configs passed to `send_transaction`.
    pub sent: Mutex<Vec<(Transaction, RpcSendTransactionConfig)>>,
    /// Commitments passed to `signature_status`.
    pub status_calls: Mutex<Vec<CommitmentConfig>>,
}

impl MockRpc {
    /// A mock where every call succeeds and the signature lands immediately.
    pub fn landing(signature: Signature) -> Self {
        Self {
            blockhash: Ok((Hash::new_from_array([7u8; 32]), 1_000)),
            send_result: Ok(signature),
            statuses: Mutex::new(VecDeque::from([Ok(SignatureStatus::Landed)])),
            block_height: 900,
            blockhash_calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            status_calls: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the scripted status sequence.
    pub fn with_statuses(self, statuses: Vec<Result<SignatureStatus, String>>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    /// Makes `send_transaction` fail with `message`.
    pub fn failing_send(mut self, message: &str) -> Self {
        self.send_result = Err(message.to_owned());
        self
    }

    /// Makes `latest_blockhash` fail with `message`.
    pub fn failing_blockhash(mut self, message: &str) -> Self {
        self.blockhash = Err(message.to_owned());
        self
    }

    /// Sets the block height reported by the node.
    pub const fn at_block_height(mut self, height: u64) -> Self {
        self.block_height = height;
        self
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl SolanaRpc for MockRpc {
    async fn latest_blockhash(
        &self,
        commitment: CommitmentConfig,
    ) -> Result<(Hash, u64), RpcError> {
        self.blockhash_calls.lock().unwrap().push(commitment);
        self.blockhash.clone().map_err(RpcError::Custom)
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
        config: RpcSendTransactionConfig,
    ) -> Result<Signature, RpcError> {
        self.sent
            .lock()
            .unwrap()
            .push((transaction.clone(), config));
        self.send_result.clone().map_err(RpcError::Custom)
    }

    async fn signature_status(
        &self,
        _signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<SignatureStatus, RpcError> {
        self.status_calls.lock().unwrap().push(commitment);
        let mut statuses = self.statuses.lock().unwrap();
        let next = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        next.unwrap_or(Ok(SignatureStatus::Pending))
            .map_err(RpcError::Custom)
    }

    async fn block_height(&self, _commitment: CommitmentConfig) -> Result<u64, RpcError> {
        Ok(self.block_height)
    }
}
