//! Transaction assembly.
//!
//! Every assembled transaction starts with a compute unit limit instruction,
//! followed by a compute unit price instruction when a priority fee is set,
//! followed by the caller's instructions in their original order. The
//! runtime reads compute budget instructions before executing the rest, so
//! they must come first.

use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_message::{Hash, Message};
use solana_pubkey::Pubkey;
use solana_transaction::{Instruction, Transaction};

use crate::config::TransactionConfig;
use crate::fee::PriorityFee;
use crate::rpc::{RpcError, SolanaRpc};

/// Errors produced while assembling a transaction.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Fetching the recent blockhash failed.
    #[error("Failed to fetch recent blockhash: {0}")]
    Blockhash(#[from] RpcError),
}

/// Returns the compute budget prefix for a transaction.
///
/// The unit limit instruction is always present. The unit price instruction
/// is only added for a non-zero `fee`.
#[must_use]
pub fn compute_budget_instructions(compute_unit_limit: u32, fee: PriorityFee) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity(2);
    instructions.push(ComputeBudgetInstruction::set_compute_unit_limit(
        compute_unit_limit,
    ));
    if !fee.is_zero() {
        instructions.push(ComputeBudgetInstruction::set_compute_unit_price(
            fee.micro_lamports(),
        ));
    }
    instructions
}

/// Prepends the compute budget instructions to the caller's instructions.
#[must_use]
pub fn compose_instructions<I>(
    config: &TransactionConfig,
    fee: PriorityFee,
    instructions: I,
) -> Vec<Instruction>
where
    I: IntoIterator<Item = Instruction>,
{
    let mut composed = compute_budget_instructions(config.compute_unit_limit, fee);
    composed.extend(instructions);
    composed
}

/// Builds an unsigned transaction from already-composed instructions.
fn unsigned_transaction(
    instructions: &[Instruction],
    payer: &Pubkey,
    blockhash: &Hash,
) -> Transaction {
    let message = Message::new_with_blockhash(instructions, Some(payer), blockhash);
    Transaction::new_unsigned(message)
}

/// Assembles an unsigned transaction ready for signing.
///
/// Fetches the latest blockhash at [`TransactionConfig::blockhash_commitment`]
/// and stamps it onto the message. `payer` becomes the fee payer.
///
/// # Errors
///
/// Returns [`BuildError::Blockhash`] if the blockhash request fails. The
/// request is not retried.
pub async fn create_transaction<R: SolanaRpc + ?Sized>(
    rpc: &R,
    instructions: Vec<Instruction>,
    payer: &Pubkey,
    fee: PriorityFee,
    config: &TransactionConfig,
) -> Result<Transaction, BuildError> {
    let instructions = compose_instructions(config, fee, instructions);
    let (blockhash, _) = rpc
        .latest_blockhash(config.blockhash_commitment.into())
        .await?;
    tracing::debug!(
        payer = %payer,
        compute_unit_limit = config.compute_unit_limit,
        micro_lamports = fee.micro_lamports(),
        instructions = instructions.len(),
        blockhash = %blockhash,
        "Assembled transaction"
    );
    Ok(unsigned_transaction(&instructions, payer, &blockhash))
}

/// Fluent alternative to [`create_transaction`].
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    payer: Pubkey,
    instructions: Vec<Instruction>,
    fee: PriorityFee,
    config: TransactionConfig,
}

impl TransactionBuilder {
    /// Creates a builder for a fee payer with no priority fee and default config.
    #[must_use]
    pub fn new(payer: Pubkey) -> Self {
        Self {
            payer,
            instructions: Vec::new(),
            fee: PriorityFee::ZERO,
            config: TransactionConfig::default(),
        }
    }

    /// Appends one instruction.
    #[must_use]
    pub fn add_instruction(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    /// Appends many instructions.
    #[must_use]
    pub fn add_instructions<I>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = Instruction>,
    {
        self.instructions.extend(instructions);
        self
    }

    /// Sets the priority fee.
    #[must_use]
    pub const fn with_priority_fee(mut self, fee: PriorityFee) -> Self {
        self.fee = fee;
        self
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: TransactionConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the transaction against a known blockhash, without any network call.
    #[must_use]
    pub fn build_with_blockhash(self, blockhash: Hash) -> Transaction {
        let instructions = compose_instructions(&self.config, self.fee, self.instructions);
        unsigned_transaction(&instructions, &self.payer, &blockhash)
    }

    /// Fetches a blockhash and builds the transaction.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Blockhash`] if the blockhash request fails.
    pub async fn build<R: SolanaRpc + ?Sized>(self, rpc: &R) -> Result<Transaction, BuildError> {
        create_transaction(rpc, self.instructions, &self.payer, self.fee, &self.config).await
    }
}
