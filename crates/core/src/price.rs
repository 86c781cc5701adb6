//! Price value object: non-negative, fixed-point, two fractional digits.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// A sweet's price.
///
/// Immutable and compared by value. Always stored at scale 2, so `3.5`
/// normalizes to `3.50` and serializes as the string `"3.50"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Normalize and validate a decimal amount.
    ///
    /// Rejects negative amounts; rounds anything beyond two fractional
    /// digits half-up and rescales so equality and display are canonical.
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::field(
                "price",
                "Ensure this value is greater than or equal to 0.",
            ));
        }
        let mut normalized = amount.round_dp(2);
        normalized.rescale(2);
        Ok(Self(normalized))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|_| DomainError::field("price", "A valid number is required."))?;
        Self::new(amount)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Fully qualified: `Decimal` also has an inherent `deserialize`
        // taking a 16-byte array, which would otherwise shadow the trait.
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Price::new(amount).map_err(serde::de::Error::custom)
    }
}
