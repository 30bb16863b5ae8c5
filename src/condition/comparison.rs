use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Price, Result};

/// Binary relation between a value and its target.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum Relation {
    Above,
    AboveOrEqual,
    Below,
    BelowOrEqual,
    Equal,
}

impl Relation {
    pub const ALL: [Self; 5] = [
        Self::Above,
        Self::AboveOrEqual,
        Self::Below,
        Self::BelowOrEqual,
        Self::Equal,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::AboveOrEqual => "aboveOrEqual",
            Self::Below => "below",
            Self::BelowOrEqual => "belowOrEqual",
            Self::Equal => "equal",
        }
    }

    #[inline]
    #[must_use]
    pub fn holds(self, value: Price, target: Price) -> bool {
        match self {
            Self::Above => value > target,
            Self::AboveOrEqual => value >= target,
            Self::Below => value < target,
            Self::BelowOrEqual => value <= target,
            Self::Equal => value == target,
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|relation| relation.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidRelation(s.to_owned()))
    }
}

impl TryFrom<String> for Relation {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Comparison of a resolved value against a threshold or band.
///
/// ```json
/// { "relation": "above" }
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    #[serde(default)]
    pub relation: Option<Relation>,
}

impl Comparison {
    #[must_use]
    pub fn new(relation: Relation) -> Self {
        Self {
            relation: Some(relation),
        }
    }

    /// # Errors
    ///
    /// [`ConfigError::MissingComparison`] when no relation is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.relation().map(|_| ())
    }

    fn relation(&self) -> Result<Relation, ConfigError> {
        self.relation.ok_or(ConfigError::MissingComparison)
    }

    /// Whether `value` stands in the configured relation to `target`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingComparison`] when no relation is configured.
    pub fn evaluate(&self, value: Price, target: Price) -> Result<bool> {
        Ok(self.relation()?.holds(value, target))
    }
}
