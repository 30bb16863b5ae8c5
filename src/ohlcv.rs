use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price value.
///
/// Semantic alias for [`Decimal`]. All arithmetic in this crate is
/// fixed-point; there is no binary floating point on any calculation path.
pub type Price = Decimal;

/// OHLC bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid conversion.
/// Engines accept `&[impl Ohlcv]` ordered oldest first, newest last, and
/// extract the configured [`PriceSource`](crate::PriceSource) internally.
///
/// # Example
///
/// ```
/// use quantedge_signals::{Ohlcv, Price};
///
/// struct MyKline {
///     o: Price, h: Price, l: Price, c: Price,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing (or latest) price of the bar.
    fn close(&self) -> Price;
}

/// Plain OHLC bar.
///
/// Ready-made [`Ohlcv`] implementation for callers that do not have their
/// own candle type. Deserializes from numbers or decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Candle {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Candle {
    #[must_use]
    pub fn new(open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }
}

impl Ohlcv for Candle {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }
}
