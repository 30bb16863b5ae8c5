use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, IndicatorConfig, Ma, MaConfig, MarketData, Ohlcv, Price, Result,
    Snapshot, SnapshotStore, SpreadSnapshot, Tool,
    condition::{Comparison, Diff},
    validate_distinct,
};

/// Which moving average the spread is measured from.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SpreadBase {
    #[default]
    Ma1,
    Ma2,
}

impl SpreadBase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ma1 => "ma1",
            Self::Ma2 => "ma2",
        }
    }

    /// Orders `(ma1, ma2)` as `(base, other)`.
    #[inline]
    #[must_use]
    pub fn order(self, ma1: Price, ma2: Price) -> (Price, Price) {
        match self {
            Self::Ma1 => (ma1, ma2),
            Self::Ma2 => (ma2, ma1),
        }
    }
}

impl Display for SpreadBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpreadBase {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ma1" => Ok(Self::Ma1),
            "ma2" => Ok(Self::Ma2),
            _ => Err(ConfigError::InvalidSpreadBase(s.to_owned())),
        }
    }
}

impl TryFrom<String> for SpreadBase {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Configuration of a [`MaSpreadTool`].
///
/// ```json
/// {
///   "ma1": { "maType": "ema", "period": 12, "price": "close" },
///   "ma2": { "maType": "ema", "period": 26, "price": "close" },
///   "base": "ma2",
///   "diff": { "measure": "percent" },
///   "comparison": { "relation": "above" },
///   "value": "0.5"
/// }
/// ```
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaSpreadToolConfig {
    pub ma1: MaConfig,
    pub ma2: MaConfig,
    #[serde(default)]
    pub base: SpreadBase,
    #[serde(default)]
    pub diff: Diff,
    #[serde(default)]
    pub comparison: Comparison,
    pub value: Decimal,
}

impl MaSpreadToolConfig {
    /// # Errors
    ///
    /// The first [`ConfigError`] found in either average or the
    /// comparison, or [`ConfigError::SamePeriodMas`] when both averages
    /// would read the same window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_mas().map(|_| ())
    }

    fn build_mas(&self) -> Result<(Ma, Ma), ConfigError> {
        self.ma1.validate()?;
        self.ma2.validate()?;
        self.comparison.validate()?;

        let ma1 = self.ma1.build()?;
        let ma2 = self.ma2.build()?;
        validate_distinct(&ma1, &ma2)?;

        Ok((ma1, ma2))
    }
}

/// Compares the spread between two moving averages with a threshold.
///
/// The spread is measured from the configured base average with the
/// configured [`Diff`]; the condition holds when
/// `spread <relation> value`.
#[derive(Clone, Debug)]
pub struct MaSpreadTool {
    config: MaSpreadToolConfig,
    ma1: Ma,
    ma2: Ma,
    snapshots: SnapshotStore<SpreadSnapshot>,
}

impl MaSpreadTool {
    #[must_use]
    pub fn config(&self) -> &MaSpreadToolConfig {
        &self.config
    }
}

impl Tool for MaSpreadTool {
    type Config = MaSpreadToolConfig;
    type Data = SpreadSnapshot;

    fn new(config: MaSpreadToolConfig) -> Result<Self> {
        let (ma1, ma2) = config.build_mas()?;

        tracing::debug!(%ma1, %ma2, base = %config.base, "moving average spread tool built");

        Ok(Self {
            config,
            ma1,
            ma2,
            snapshots: SnapshotStore::new(),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }

    #[inline]
    fn candles_count(&self) -> usize {
        self.ma1.candles_count().max(self.ma2.candles_count())
    }

    fn evaluate<B: Ohlcv>(&self, market: &MarketData<'_, B>) -> Result<Snapshot<SpreadSnapshot>> {
        let ma1 = self.ma1.calc(market.candles)?;
        let ma2 = self.ma2.calc(market.candles)?;

        let (base, other) = self.config.base.order(ma1, ma2);
        let spread = self.config.diff.calc(base, other)?;
        let met = self.config.comparison.evaluate(spread, self.config.value)?;

        Ok(Snapshot::new(met, SpreadSnapshot { spread, ma1, ma2 }))
    }

    fn conditions_met<B: Ohlcv>(&mut self, market: &MarketData<'_, B>) -> Result<bool> {
        let outcome = self.evaluate(market);
        self.snapshots.record(outcome)
    }

    fn snapshot(&self) -> &Snapshot<SpreadSnapshot> {
        self.snapshots.last()
    }
}
