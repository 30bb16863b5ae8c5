use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Bb, BbConfig, BbSnapshot, BbValue, ConfigError, IndicatorConfig, MarketData, Ohlcv,
    Price, Result, Snapshot, SnapshotStore, Tool,
    condition::{Comparison, Resolver, Shift, ValueSource},
};

/// Which Bollinger band a [`BbTool`] compares against.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Band {
    Upper,
    Lower,
}

impl Band {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
        }
    }

    #[inline]
    #[must_use]
    pub fn select(self, value: &BbValue) -> Price {
        match self {
            Self::Upper => value.upper(),
            Self::Lower => value.lower(),
        }
    }
}

impl Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            _ => Err(ConfigError::InvalidBand(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Band {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Configuration of a [`BbTool`].
///
/// ```json
/// {
///   "bb": { "period": 20, "stdev": 2, "price": "close", "maType": "sma" },
///   "band": "lower",
///   "comparison": { "relation": "below" },
///   "shift": { "measure": "percent", "value": -1 },
///   "object": "last"
/// }
/// ```
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BbToolConfig {
    pub bb: BbConfig,
    pub band: Band,
    #[serde(default)]
    pub comparison: Comparison,
    #[serde(default)]
    pub shift: Option<Shift>,
    pub object: ValueSource,
}

impl BbToolConfig {
    /// # Errors
    ///
    /// The first [`ConfigError`] found in the bands, comparison, shift or
    /// value source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bb.validate()?;
        self.comparison.validate()?;
        if let Some(shift) = &self.shift {
            shift.validate()?;
        }
        BbTool::RESOLVER.check(self.object)?;

        Ok(())
    }
}

/// Compares a market value with a (optionally shifted) Bollinger band.
///
/// The condition holds when `value <relation> shifted_band`.
#[derive(Clone, Debug)]
pub struct BbTool {
    config: BbToolConfig,
    bb: Bb,
    object: ValueSource,
    snapshots: SnapshotStore<BbSnapshot>,
}

impl BbTool {
    const RESOLVER: Resolver = Resolver::any();

    #[must_use]
    pub fn config(&self) -> &BbToolConfig {
        &self.config
    }
}

impl Tool for BbTool {
    type Config = BbToolConfig;
    type Data = BbSnapshot;

    fn new(config: BbToolConfig) -> Result<Self> {
        config.validate()?;

        let bb = config.bb.build()?;
        let object = config.object;

        tracing::debug!(%bb, band = %config.band, %object, "bollinger bands tool built");

        Ok(Self {
            config,
            bb,
            object,
            snapshots: SnapshotStore::new(),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }

    #[inline]
    fn candles_count(&self) -> usize {
        self.bb.candles_count()
    }

    fn evaluate<B: Ohlcv>(&self, market: &MarketData<'_, B>) -> Result<Snapshot<BbSnapshot>> {
        let bands = self.bb.calc(market.candles)?;
        let band = self.config.band.select(&bands);
        let shifted_band = self.config.shift.map_or(Ok(band), |shift| shift.apply(band))?;
        let value = Self::RESOLVER.resolve(self.object, market)?;
        let met = self.config.comparison.evaluate(value, shifted_band)?;

        Ok(Snapshot::new(
            met,
            BbSnapshot {
                upper: bands.upper(),
                middle: bands.middle(),
                lower: bands.lower(),
                shifted_band,
                value,
            },
        ))
    }

    fn conditions_met<B: Ohlcv>(&mut self, market: &MarketData<'_, B>) -> Result<bool> {
        let outcome = self.evaluate(market);
        self.snapshots.record(outcome)
    }

    fn snapshot(&self) -> &Snapshot<BbSnapshot> {
        self.snapshots.last()
    }
}
