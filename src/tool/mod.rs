//! Strategy tools: indicators wired to a condition.

mod bb;
mod ma_spread;
mod price_ma;

pub use bb::{Band, BbTool, BbToolConfig};
pub use ma_spread::{MaSpreadTool, MaSpreadToolConfig, SpreadBase};
pub use price_ma::{PriceMaTool, PriceMaToolConfig};

use std::fmt::Debug;

use crate::{ConfigError, MarketData, Ohlcv, Result, Snapshot};

/// A condition evaluated against market data on every tick.
///
/// Tools are built once from validated configuration and then reused. The
/// only state they carry between calls is the snapshot of the last
/// [`conditions_met`](Tool::conditions_met) call.
///
/// # Example
///
/// ```
/// use quantedge_signals::{
///     Candle, MaConfig, MaType, MarketData, PriceMaTool, PriceMaToolConfig, Ticker, Tool,
/// };
/// use rust_decimal_macros::dec;
///
/// let config: PriceMaToolConfig = serde_json::from_str(
///     r#"{
///         "ma": { "maType": "sma", "period": 2, "price": "close" },
///         "comparison": { "relation": "above" },
///         "object": "last"
///     }"#,
/// )
/// .unwrap();
/// let mut tool = PriceMaTool::new(config).unwrap();
///
/// let candles = [dec!(10), dec!(12)].map(|p| Candle::new(p, p, p, p));
/// let market = MarketData::new(&candles, Ticker::new(dec!(12), dec!(11.9), dec!(12.1)));
///
/// assert_eq!(tool.conditions_met(&market), Ok(true));
/// assert_eq!(tool.snapshot().data.ma, dec!(11));
/// ```
pub trait Tool: Sized {
    /// Declarative configuration the tool is built from.
    type Config;

    /// Values recorded in the tool's snapshot.
    type Data: Default + Clone + Debug;

    /// Validates `config` and builds the tool.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found in `config`.
    fn new(config: Self::Config) -> Result<Self>;

    /// Re-checks every nested configuration value.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Bars needed by the most demanding indicator the tool owns.
    fn candles_count(&self) -> usize;

    /// Computes the snapshot for `market` without recording it.
    ///
    /// # Errors
    ///
    /// Any indicator, resolver or comparison error, unchanged.
    fn evaluate<B: Ohlcv>(&self, market: &MarketData<'_, B>) -> Result<Snapshot<Self::Data>>;

    /// Evaluates `market`, records the snapshot and returns whether the
    /// condition holds.
    ///
    /// On error the recorded snapshot is cleared before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Same as [`evaluate`](Tool::evaluate).
    fn conditions_met<B: Ohlcv>(&mut self, market: &MarketData<'_, B>) -> Result<bool>;

    /// Snapshot recorded by the last [`conditions_met`](Tool::conditions_met).
    fn snapshot(&self) -> &Snapshot<Self::Data>;

    /// Clears per-run state. Tools in this crate keep none beyond the
    /// snapshot, which every evaluation overwrites.
    fn reset(&mut self) {}
}
