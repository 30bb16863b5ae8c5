use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ComputationError, Price, Result, condition::Measure};

/// Difference between a base value and another value.
///
/// ```text
/// units:   base − other
/// percent: (base − other) / base × 100
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diff {
    #[serde(default)]
    pub measure: Measure,
}

impl Diff {
    #[must_use]
    pub fn new(measure: Measure) -> Self {
        Self { measure }
    }

    /// # Errors
    ///
    /// - [`ComputationError::DivisionByZero`] for a percent difference
    ///   against a zero base.
    /// - [`ComputationError::Overflow`] when the difference leaves the
    ///   `Decimal` range.
    pub fn calc(&self, base: Price, other: Price) -> Result<Price> {
        let delta = base.checked_sub(other).ok_or(ComputationError::Overflow)?;

        match self.measure {
            Measure::Units => Ok(delta),
            Measure::Percent => {
                if base.is_zero() {
                    return Err(ComputationError::DivisionByZero.into());
                }
                delta
                    .checked_div(base)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .ok_or_else(|| ComputationError::Overflow.into())
            }
        }
    }
}
