//! Base58 secret key decoding.
//!
//! Solana wallets export secret keys as the base58 encoding of 64 bytes: the
//! 32-byte ed25519 seed followed by the 32-byte public key.

use solana_keypair::Keypair;

/// Length in bytes of a full Solana secret key (seed + public key).
pub const SECRET_KEY_LENGTH: usize = 64;

/// Errors produced while decoding a secret key.
#[derive(Debug, thiserror::Error)]
pub enum KeypairError {
    /// The input is not valid base58.
    #[error("Secret key is not valid base58: {0}")]
    InvalidBase58(#[from] bs58::decode::Error),
    /// The decoded bytes have the wrong length.
    #[error("Secret key must be {SECRET_KEY_LENGTH} bytes, got {0}")]
    InvalidLength(usize),
    /// The bytes do not form a consistent ed25519 keypair.
    #[error("Invalid keypair: {0}")]
    InvalidKey(String),
}

/// Decodes a base58-encoded 64-byte secret key into a [`Keypair`].
///
/// Leading and trailing whitespace is ignored.
///
/// # Errors
///
/// Returns [`KeypairError`] if the string is not base58, does not decode to
/// exactly 64 bytes, or the public half does not match the seed.
pub fn keypair_from_base58(key: &str) -> Result<Keypair, KeypairError> {
    let bytes = bs58::decode(key.trim()).into_vec()?;
    if bytes.len() != SECRET_KEY_LENGTH {
        return Err(KeypairError::InvalidLength(bytes.len()));
    }
    Keypair::try_from(bytes.as_slice()).map_err(|e| KeypairError::InvalidKey(e.to_string()))
}

/// Encodes the full 64-byte secret of `keypair` as base58.
#[must_use]
pub fn keypair_to_base58(keypair: &Keypair) -> String {
    bs58::encode(keypair.to_bytes()).into_string()
}
