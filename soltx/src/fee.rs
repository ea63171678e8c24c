//! Priority fee conversion.
//!
//! Callers express the priority fee in SOL. The compute-unit price
//! instruction takes micro-lamports, so the SOL amount is scaled by
//! [`MICRO_LAMPORTS_PER_SOL`]. Amounts go through [`Decimal`] so values
//! like `0.000005` convert without binary floating point drift.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Multiplier from a SOL-denominated priority fee to the compute-unit price.
pub const MICRO_LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Errors produced while converting a priority fee.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeeError {
    /// The fee is negative.
    #[error("Priority fee must be non-negative: {0} SOL")]
    Negative(Decimal),
    /// The fee is not a finite number or not parseable.
    #[error("Priority fee is not a valid number: {0}")]
    Invalid(String),
    /// The fee converts to a fractional number of micro-lamports.
    #[error("Priority fee {0} SOL is not a whole number of micro-lamports")]
    Fractional(Decimal),
    /// The fee converts to more micro-lamports than fit in a `u64`.
    #[error("Priority fee {0} SOL overflows the compute unit price")]
    Overflow(Decimal),
}

/// A non-negative priority fee, stored as a compute-unit price in micro-lamports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriorityFee(u64);

impl PriorityFee {
    /// No priority fee; the compute-unit price instruction is omitted.
    pub const ZERO: Self = Self(0);

    /// Creates a fee directly from a compute-unit price in micro-lamports.
    #[must_use]
    pub const fn from_micro_lamports(micro_lamports: u64) -> Self {
        Self(micro_lamports)
    }

    /// Creates a fee from an amount in SOL.
    ///
    /// # Errors
    ///
    /// Returns [`FeeError`] if `sol` is negative, or does not convert to a
    /// whole `u64` number of micro-lamports.
    pub fn from_sol(sol: Decimal) -> Result<Self, FeeError> {
        if sol.is_sign_negative() && !sol.is_zero() {
            return Err(FeeError::Negative(sol));
        }
        let scaled = sol
            .checked_mul(Decimal::from(MICRO_LAMPORTS_PER_SOL))
            .ok_or(FeeError::Overflow(sol))?;
        if !scaled.fract().is_zero() {
            return Err(FeeError::Fractional(sol));
        }
        scaled.to_u64().map(Self).ok_or(FeeError::Overflow(sol))
    }

    /// Parses a SOL amount such as `"0.000005"`.
    ///
    /// # Errors
    ///
    /// Returns [`FeeError::Invalid`] if the string is not a decimal number,
    /// plus the errors of [`PriorityFee::from_sol`].
    pub fn from_sol_str(sol: &str) -> Result<Self, FeeError> {
        let sol = Decimal::from_str(sol.trim()).map_err(|_| FeeError::Invalid(sol.to_owned()))?;
        Self::from_sol(sol)
    }

    /// Creates a fee from a floating point SOL amount.
    ///
    /// The shortest decimal rendering of `sol` is used, so `0.000005`
    /// yields exactly 5000 micro-lamports.
    ///
    /// # Errors
    ///
    /// Returns [`FeeError::Invalid`] for non-finite input, plus the errors of
    /// [`PriorityFee::from_sol`].
    pub fn from_sol_f64(sol: f64) -> Result<Self, FeeError> {
        if !sol.is_finite() {
            return Err(FeeError::Invalid(sol.to_string()));
        }
        Self::from_sol_str(&sol.to_string())
    }

    /// Returns the compute-unit price in micro-lamports.
    #[must_use]
    pub const fn micro_lamports(self) -> u64 {
        self.0
    }

    /// Returns `true` when no priority fee applies.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PriorityFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} micro-lamports/CU", self.0)
    }
}

impl FromStr for PriorityFee {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_sol_str(s)
    }
}
