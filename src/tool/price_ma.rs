use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, IndicatorConfig, Ma, MaConfig, MarketData, Ohlcv, PriceMaSnapshot,
    Result, Snapshot, SnapshotStore, Tool,
    condition::{Comparison, Resolver, Shift, ValueSource},
};

/// Configuration of a [`PriceMaTool`].
///
/// ```json
/// {
///   "ma": { "maType": "wma", "period": 50, "price": "close" },
///   "comparison": { "relation": "above" },
///   "shift": { "measure": "units", "value": 10 },
///   "object": "ask"
/// }
/// ```
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceMaToolConfig {
    pub ma: MaConfig,
    #[serde(default)]
    pub comparison: Comparison,
    #[serde(default)]
    pub shift: Option<Shift>,
    pub object: ValueSource,
}

impl PriceMaToolConfig {
    /// # Errors
    ///
    /// The first [`ConfigError`] found. Only ticker value sources are
    /// accepted as `object`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ma.validate()?;
        self.comparison.validate()?;
        if let Some(shift) = &self.shift {
            shift.validate()?;
        }
        PriceMaTool::RESOLVER.check(self.object)?;

        Ok(())
    }
}

/// Compares a live ticker price with a (optionally shifted) moving
/// average.
///
/// The condition holds when `value <relation> shifted_ma`.
#[derive(Clone, Debug)]
pub struct PriceMaTool {
    config: PriceMaToolConfig,
    ma: Ma,
    object: ValueSource,
    snapshots: SnapshotStore<PriceMaSnapshot>,
}

impl PriceMaTool {
    const RESOLVER: Resolver = Resolver::ticker_only();

    #[must_use]
    pub fn config(&self) -> &PriceMaToolConfig {
        &self.config
    }
}

impl Tool for PriceMaTool {
    type Config = PriceMaToolConfig;
    type Data = PriceMaSnapshot;

    fn new(config: PriceMaToolConfig) -> Result<Self> {
        config.validate()?;

        let ma = config.ma.build()?;
        let object = config.object;

        tracing::debug!(%ma, %object, "price to moving average tool built");

        Ok(Self {
            config,
            ma,
            object,
            snapshots: SnapshotStore::new(),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }

    #[inline]
    fn candles_count(&self) -> usize {
        self.ma.candles_count()
    }

    fn evaluate<B: Ohlcv>(&self, market: &MarketData<'_, B>) -> Result<Snapshot<PriceMaSnapshot>> {
        let ma = self.ma.calc(market.candles)?;
        let shifted_ma = self.config.shift.map_or(Ok(ma), |shift| shift.apply(ma))?;
        let value = Self::RESOLVER.resolve(self.object, market)?;
        let met = self.config.comparison.evaluate(value, shifted_ma)?;

        Ok(Snapshot::new(
            met,
            PriceMaSnapshot {
                ma,
                shifted_ma,
                value,
            },
        ))
    }

    fn conditions_met<B: Ohlcv>(&mut self, market: &MarketData<'_, B>) -> Result<bool> {
        let outcome = self.evaluate(market);
        self.snapshots.record(outcome)
    }

    fn snapshot(&self) -> &Snapshot<PriceMaSnapshot> {
        self.snapshots.last()
    }
}
