use std::{
    fmt::Display,
    num::NonZero,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, Ema, Indicator, IndicatorConfig, Ohlcv, Price, PriceSource, Result, Sma, Wma,
    indicator::{validate_offset, validate_period},
};

/// Moving average type tag.
///
/// The single source of truth for valid type names: `sma`, `ema`, `wma`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MaType {
    #[default]
    Sma,
    Ema,
    Wma,
}

impl MaType {
    /// All registered types.
    pub const ALL: [Self; 3] = [Self::Sma, Self::Ema, Self::Wma];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Wma => "wma",
        }
    }
}

impl Display for MaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ma_type| ma_type.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidMaType(s.to_owned()))
    }
}

impl TryFrom<String> for MaType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A moving average engine of any registered type.
///
/// Closed set of variants; dispatch is a plain `match`.
///
/// # Example
///
/// ```
/// use quantedge_signals::{Ma, MaType, PriceSource};
/// use std::num::NonZero;
///
/// let ma_type: MaType = "ema".parse().unwrap();
/// let ma = Ma::new(ma_type, NonZero::new(3).unwrap(), 2, PriceSource::Close);
///
/// assert_eq!(ma.ma_type(), MaType::Ema);
/// assert_eq!(ma.candles_count(), 8);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Ma {
    Sma(Sma),
    Ema(Ema),
    Wma(Wma),
}

impl Ma {
    /// Builds the engine registered for `ma_type`.
    #[must_use]
    pub fn new(ma_type: MaType, period: NonZero<usize>, offset: usize, source: PriceSource) -> Self {
        tracing::trace!(%ma_type, period = period.get(), offset, %source, "building moving average");

        match ma_type {
            MaType::Sma => Self::Sma(Sma::new(period, offset, source)),
            MaType::Ema => Self::Ema(Ema::new(period, offset, source)),
            MaType::Wma => Self::Wma(Wma::new(period, offset, source)),
        }
    }

    /// Declared type of this engine.
    #[must_use]
    pub fn ma_type(&self) -> MaType {
        match self {
            Self::Sma(_) => MaType::Sma,
            Self::Ema(_) => MaType::Ema,
            Self::Wma(_) => MaType::Wma,
        }
    }
}

impl Indicator for Ma {
    type Output = Price;

    #[inline]
    fn candles_count(&self) -> usize {
        match self {
            Self::Sma(ma) => ma.candles_count(),
            Self::Ema(ma) => ma.candles_count(),
            Self::Wma(ma) => ma.candles_count(),
        }
    }

    fn calc(&self, bars: &[impl Ohlcv]) -> Result<Price> {
        match self {
            Self::Sma(ma) => ma.calc(bars),
            Self::Ema(ma) => ma.calc(bars),
            Self::Wma(ma) => ma.calc(bars),
        }
    }

    fn calc_values(&self, values: &[Price]) -> Result<Price> {
        match self {
            Self::Sma(ma) => ma.calc_values(values),
            Self::Ema(ma) => ma.calc_values(values),
            Self::Wma(ma) => ma.calc_values(values),
        }
    }
}

impl Display for Ma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sma(ma) => Display::fmt(ma, f),
            Self::Ema(ma) => Display::fmt(ma, f),
            Self::Wma(ma) => Display::fmt(ma, f),
        }
    }
}

/// Declarative moving average configuration.
///
/// ```json
/// { "maType": "ema", "period": 20, "price": "close", "offset": 0 }
/// ```
///
/// `offset` is optional and defaults to `0`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaConfig {
    pub ma_type: MaType,
    pub period: u32,
    pub price: PriceSource,
    #[serde(default)]
    pub offset: usize,
}

impl MaConfig {
    /// MA of `ma_type` over closing prices, without offset.
    #[must_use]
    pub fn new(ma_type: MaType, period: u32) -> Self {
        Self {
            ma_type,
            period,
            price: PriceSource::Close,
            offset: 0,
        }
    }

    #[must_use]
    pub fn with_price(mut self, price: PriceSource) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Validates the config and builds its engine.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidPeriod`] when the period is out of range.
    /// - [`ConfigError::InvalidOffset`] when the offset is too large.
    pub fn build(&self) -> Result<Ma, ConfigError> {
        let period = validate_period(self.period)?;
        let offset = validate_offset(self.offset)?;
        Ok(Ma::new(self.ma_type, period, offset, self.price))
    }
}

impl IndicatorConfig for MaConfig {
    #[inline]
    fn period(&self) -> u32 {
        self.period
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    fn price(&self) -> PriceSource {
        self.price
    }
}

impl Display for MaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MaConfig({}, {}, {}, {})",
            self.ma_type, self.period, self.offset, self.price
        )
    }
}

/// Rejects two moving averages of the same type that read the same number
/// of bars: their spread would be identically zero.
///
/// Different types are exempt even when their counts coincide.
///
/// # Errors
///
/// [`ConfigError::SamePeriodMas`].
pub fn validate_distinct(a: &Ma, b: &Ma) -> Result<(), ConfigError> {
    if a.ma_type() == b.ma_type() && a.candles_count() == b.candles_count() {
        return Err(ConfigError::SamePeriodMas {
            ma_type: a.ma_type(),
            candles: a.candles_count(),
        });
    }

    Ok(())
}
