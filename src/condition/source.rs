use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Error, MarketData, Ohlcv, Price, PriceSource, Result};

/// Named market value a condition compares against.
///
/// `last`, `bid` and `ask` read the ticker; `open`, `high`, `low` and
/// `close` read the newest candle.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ValueSource {
    Last,
    Bid,
    Ask,
    Open,
    High,
    Low,
    Close,
}

impl ValueSource {
    pub const ALL: [Self; 7] = [
        Self::Last,
        Self::Bid,
        Self::Ask,
        Self::Open,
        Self::High,
        Self::Low,
        Self::Close,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Last => "last",
            Self::Bid => "bid",
            Self::Ask => "ask",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
        }
    }

    /// Candle field this source reads, `None` for ticker sources.
    #[must_use]
    pub fn candle_field(self) -> Option<PriceSource> {
        match self {
            Self::Last | Self::Bid | Self::Ask => None,
            Self::Open => Some(PriceSource::Open),
            Self::High => Some(PriceSource::High),
            Self::Low => Some(PriceSource::Low),
            Self::Close => Some(PriceSource::Close),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_ticker(self) -> bool {
        self.candle_field().is_none()
    }
}

impl Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownValueSource(s.to_owned()))
    }
}

impl TryFrom<String> for ValueSource {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Resolves value source names against market data.
///
/// A resolver restricts which sources a tool may use: some tools only
/// make sense against live ticker prices.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Resolver {
    ticker_only: bool,
}

impl Resolver {
    /// Accepts every [`ValueSource`].
    #[must_use]
    pub const fn any() -> Self {
        Self { ticker_only: false }
    }

    /// Accepts `last`, `bid` and `ask` only.
    #[must_use]
    pub const fn ticker_only() -> Self {
        Self { ticker_only: true }
    }

    #[inline]
    #[must_use]
    pub fn allows(self, source: ValueSource) -> bool {
        !self.ticker_only || source.is_ticker()
    }

    /// Checks that this resolver accepts `source`.
    ///
    /// Unknown names never get this far: they fail to parse with
    /// [`ConfigError::UnknownValueSource`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::ValueSourceNotAllowed`] for a source this resolver
    /// does not accept.
    pub fn check(self, source: ValueSource) -> Result<ValueSource, ConfigError> {
        if !self.allows(source) {
            return Err(ConfigError::ValueSourceNotAllowed(source.as_str().to_owned()));
        }
        Ok(source)
    }

    /// Current value of `source`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ValueSourceNotAllowed`] when the resolver does not
    ///   accept `source`.
    /// - [`Error::InsufficientData`] when a candle source meets an empty
    ///   candle slice.
    pub fn resolve<B: Ohlcv>(self, source: ValueSource, market: &MarketData<'_, B>) -> Result<Price> {
        self.check(source)?;

        let ticker = &market.ticker;
        match source {
            ValueSource::Last => Ok(ticker.last),
            ValueSource::Bid => Ok(ticker.bid),
            ValueSource::Ask => Ok(ticker.ask),
            ValueSource::Open => newest(market, PriceSource::Open),
            ValueSource::High => newest(market, PriceSource::High),
            ValueSource::Low => newest(market, PriceSource::Low),
            ValueSource::Close => newest(market, PriceSource::Close),
        }
    }
}

fn newest<B: Ohlcv>(market: &MarketData<'_, B>, field: PriceSource) -> Result<Price> {
    let candle = market.candles.last().ok_or(Error::InsufficientData {
        required: 1,
        available: 0,
    })?;
    Ok(field.extract(candle))
}
