//! Transaction configuration.
//!
//! All tunables for assembly, submission, and confirmation live in
//! [`TransactionConfig`]. Every field has a default, so a partial config
//! deserializes cleanly.
//!
//! # Example Configuration
//!
//! ```json
//! {
//!   "computeUnitLimit": 400000,
//!   "blockhashCommitment": "finalized",
//!   "confirmCommitment": "confirmed",
//!   "confirmTimeoutMs": 30000
//! }
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::{CommitmentConfig, CommitmentLevel};

/// Default compute unit ceiling set on every assembled transaction.
pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 1_000_000;

/// Degree of finality requested from the cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    /// Most recent block seen by the node; may be skipped.
    #[default]
    Processed,
    /// Voted on by a supermajority of the cluster.
    Confirmed,
    /// Rooted; will not be rolled back.
    Finalized,
}

impl Commitment {
    /// Returns the SDK commitment level.
    #[must_use]
    pub const fn level(self) -> CommitmentLevel {
        match self {
            Self::Processed => CommitmentLevel::Processed,
            Self::Confirmed => CommitmentLevel::Confirmed,
            Self::Finalized => CommitmentLevel::Finalized,
        }
    }
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        Self {
            commitment: commitment.level(),
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        })
    }
}

/// Configuration for assembling, sending, and confirming transactions.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionConfig {
    /// Compute unit limit prepended to every transaction.
    /// Default: 1,000,000
    #[serde(default = "default_compute_unit_limit")]
    pub compute_unit_limit: u32,

    /// Commitment used to fetch the blockhash stamped on new transactions.
    /// Default: `finalized`
    #[serde(default = "default_blockhash_commitment")]
    pub blockhash_commitment: Commitment,

    /// Commitment used for the confirmation blockhash and status polling.
    /// Default: `processed`
    #[serde(default)]
    pub confirm_commitment: Commitment,

    /// Commitment used for preflight simulation when it is enabled.
    /// Default: `processed`
    #[serde(default)]
    pub preflight_commitment: Commitment,

    /// Skip the node's preflight simulation on submission.
    /// Default: true
    #[serde(default = "default_skip_preflight")]
    pub skip_preflight: bool,

    /// Delay between signature status polls.
    /// Default: 500 ms
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_poll_interval", rename = "pollIntervalMs")]
    pub poll_interval: Duration,

    /// Upper bound on the whole confirmation wait.
    /// Default: 60 s
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_confirm_timeout", rename = "confirmTimeoutMs")]
    pub confirm_timeout: Duration,

    /// Per-request timeout of the RPC client built by [`TransactionConfig::rpc_client`].
    /// Default: 30 s
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_rpc_timeout", rename = "rpcTimeoutMs")]
    pub rpc_timeout: Duration,
}

const fn default_compute_unit_limit() -> u32 {
    DEFAULT_COMPUTE_UNIT_LIMIT
}

const fn default_blockhash_commitment() -> Commitment {
    Commitment::Finalized
}

const fn default_skip_preflight() -> bool {
    true
}

const fn default_poll_interval() -> Duration {
    Duration::from_millis(500)
}

const fn default_confirm_timeout() -> Duration {
    Duration::from_secs(60)
}

const fn default_rpc_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            compute_unit_limit: default_compute_unit_limit(),
            blockhash_commitment: default_blockhash_commitment(),
            confirm_commitment: Commitment::default(),
            preflight_commitment: Commitment::default(),
            skip_preflight: default_skip_preflight(),
            poll_interval: default_poll_interval(),
            confirm_timeout: default_confirm_timeout(),
            rpc_timeout: default_rpc_timeout(),
        }
    }
}

impl TransactionConfig {
    /// Sets the compute unit limit.
    #[must_use]
    pub const fn with_compute_unit_limit(mut self, units: u32) -> Self {
        self.compute_unit_limit = units;
        self
    }

    /// Sets the confirmation commitment.
    #[must_use]
    pub const fn with_confirm_commitment(mut self, commitment: Commitment) -> Self {
        self.confirm_commitment = commitment;
        self
    }

    /// Sets the confirmation timeout.
    #[must_use]
    pub const fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    /// Sets the signature status poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Builds a nonblocking RPC client using this config's timeout and
    /// confirmation commitment.
    #[must_use]
    pub fn rpc_client(&self, url: impl Into<String>) -> RpcClient {
        RpcClient::new_with_timeout_and_commitment(
            url.into(),
            self.rpc_timeout,
            self.confirm_commitment.into(),
        )
    }
}
