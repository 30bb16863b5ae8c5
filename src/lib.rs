//! Bar-window technical indicators and the condition tools built on them.
//!
//! Engines ([`Sma`], [`Ema`], [`Wma`], [`Bb`]) accept any slice of
//! [`Ohlcv`] bars ordered oldest first and recompute from the window on
//! every call. All arithmetic is fixed-point [`Decimal`](rust_decimal::Decimal),
//! so results are reproducible to the last digit.
//!
//! Each engine exposes [`candles_count`](Sma::candles_count),
//! [`calc`](Sma::calc) and [`calc_values`](Sma::calc_values) as inherent
//! methods, no trait import needed. Import [`Indicator`] only for generic
//! code.
//!
//! Strategy [`tool`]s combine engines with the [`condition`] primitives
//! into a boolean signal and record a [`Snapshot`] of every evaluation.

pub mod condition;
mod error;
mod indicator;
mod market;
mod ohlcv;
mod price_source;
mod snapshot;
pub mod tool;
mod window;

mod bb;
mod ema;
mod ma;
mod sma;
mod wma;

pub use crate::error::{ComputationError, ConfigError, Error, Result};
pub use crate::indicator::{Indicator, IndicatorConfig, validate_offset, validate_period};
pub use crate::market::{MarketData, Ticker};
pub use crate::ohlcv::{Candle, Ohlcv, Price};
pub use crate::price_source::PriceSource;
pub use crate::snapshot::{BbSnapshot, PriceMaSnapshot, Snapshot, SnapshotStore, SpreadSnapshot};
pub use crate::tool::{
    Band, BbTool, BbToolConfig, MaSpreadTool, MaSpreadToolConfig, PriceMaTool, PriceMaToolConfig,
    SpreadBase, Tool,
};

pub use crate::bb::{Bb, BbConfig, BbValue, StdDev};
pub use crate::ema::Ema;
pub use crate::ma::{Ma, MaConfig, MaType, validate_distinct};
pub use crate::sma::Sma;
pub use crate::wma::Wma;

/// Shortest accepted indicator period.
pub const MIN_PERIOD: u32 = 1;

/// Longest accepted indicator period.
pub const MAX_PERIOD: u32 = 200;

/// Largest accepted number of skipped newest bars.
pub const MAX_OFFSET: usize = 1_000;

macro_rules! impl_indicator_methods {
    ($type:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::candles_count`].
            #[must_use]
            #[inline]
            pub fn candles_count(&self) -> usize {
                <Self as Indicator>::candles_count(self)
            }

            /// See [`Indicator::calc`].
            ///
            /// # Errors
            ///
            /// See [`Indicator::calc`].
            #[inline]
            pub fn calc(&self, bars: &[impl Ohlcv]) -> Result<$output> {
                <Self as Indicator>::calc(self, bars)
            }

            /// See [`Indicator::calc_values`].
            ///
            /// # Errors
            ///
            /// See [`Indicator::calc_values`].
            #[inline]
            pub fn calc_values(&self, values: &[Price]) -> Result<$output> {
                <Self as Indicator>::calc_values(self, values)
            }
        }
    };
}

impl_indicator_methods!(Sma, Price);
impl_indicator_methods!(Ema, Price);
impl_indicator_methods!(Wma, Price);
impl_indicator_methods!(Ma, Price);
impl_indicator_methods!(Bb, BbValue);

#[cfg(test)]
mod test_util;
