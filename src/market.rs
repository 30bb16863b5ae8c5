use serde::{Deserialize, Serialize};

use crate::{Ohlcv, Price};

/// Latest quote for an instrument.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
pub struct Ticker {
    pub last: Price,
    pub bid: Price,
    pub ask: Price,
}

impl Ticker {
    #[must_use]
    pub fn new(last: Price, bid: Price, ask: Price) -> Self {
        Self { last, bid, ask }
    }
}

/// Market state handed to a tool on every evaluation.
///
/// `candles` are ordered oldest first, newest last.
#[derive(Debug)]
pub struct MarketData<'a, B: Ohlcv> {
    pub candles: &'a [B],
    pub ticker: Ticker,
}

impl<'a, B: Ohlcv> MarketData<'a, B> {
    #[must_use]
    pub fn new(candles: &'a [B], ticker: Ticker) -> Self {
        Self { candles, ticker }
    }
}

impl<B: Ohlcv> Clone for MarketData<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Ohlcv> Copy for MarketData<'_, B> {}
