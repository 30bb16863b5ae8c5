//! Building blocks that turn indicator values into a pass/fail decision.

mod comparison;
mod diff;
mod shift;
mod source;

pub use comparison::{Comparison, Relation};
pub use diff::Diff;
pub use shift::Shift;
pub use source::{Resolver, ValueSource};

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// How a [`Diff`] or [`Shift`] amount is expressed.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Measure {
    /// Absolute price units.
    #[default]
    Units,
    /// Percent of the base value.
    Percent,
}

impl Measure {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Units => "units",
            Self::Percent => "percent",
        }
    }
}

impl Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Measure {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "units" => Ok(Self::Units),
            "percent" => Ok(Self::Percent),
            _ => Err(ConfigError::InvalidMeasure(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Measure {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
