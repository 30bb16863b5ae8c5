use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ComputationError, ConfigError, Price, Result, condition::Measure};

/// Moves a reference value up or down before it is compared.
///
/// ```json
/// { "measure": "percent", "value": "-1.5" }
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    #[serde(default)]
    pub measure: Measure,
    pub value: Decimal,
}

impl Shift {
    #[must_use]
    pub fn new(measure: Measure, value: Decimal) -> Self {
        Self { measure, value }
    }

    #[must_use]
    pub fn units(value: Decimal) -> Self {
        Self::new(Measure::Units, value)
    }

    #[must_use]
    pub fn percent(value: Decimal) -> Self {
        Self::new(Measure::Percent, value)
    }

    /// # Errors
    ///
    /// [`ConfigError::ZeroShift`] when the shift would leave values unchanged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.value.is_zero() {
            return Err(ConfigError::ZeroShift);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`ComputationError::Overflow`] when the shifted value leaves the
    /// `Decimal` range.
    #[inline]
    pub fn apply(&self, value: Price) -> Result<Price> {
        let delta = match self.measure {
            Measure::Units => Some(self.value),
            Measure::Percent => value
                .checked_mul(self.value)
                .map(|scaled| scaled / Decimal::ONE_HUNDRED),
        };

        delta
            .and_then(|delta| value.checked_add(delta))
            .ok_or_else(|| ComputationError::Overflow.into())
    }
}

impl Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shift({} {})", self.value, self.measure)
    }
}
