use std::{fmt::Display, num::NonZero};

use rust_decimal::Decimal;

use crate::{Indicator, Ohlcv, Price, PriceSource, Result, indicator::checked_sum, window::Window};

/// Simple Moving Average (SMA).
///
/// Unweighted mean of the selected price over `period` bars, ending
/// `offset` bars before the newest one. Also serves as the seed of
/// [`Ema`](crate::Ema) and the deviation mean of [`Bb`](crate::Bb).
///
/// # Example
///
/// ```rust
/// use quantedge_signals::{Candle, PriceSource, Sma};
/// use rust_decimal_macros::dec;
/// use std::num::NonZero;
///
/// let sma = Sma::new(NonZero::new(2).unwrap(), 1, PriceSource::Close);
/// let bars: Vec<Candle> = [dec!(10), dec!(20), dec!(90)]
///     .into_iter()
///     .map(|p| Candle::new(p, p, p, p))
///     .collect();
///
/// // Newest bar skipped: (10 + 20) / 2
/// assert_eq!(sma.candles_count(), 3);
/// assert_eq!(sma.calc(&bars), Ok(dec!(15)));
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Sma {
    window: Window,
    source: PriceSource,
}

impl Sma {
    #[must_use]
    pub fn new(period: NonZero<usize>, offset: usize, source: PriceSource) -> Self {
        Self {
            window: Window::new(period.get(), offset),
            source,
        }
    }

    fn mean(&self, window: impl Iterator<Item = Price>) -> Result<Price> {
        Ok(checked_sum(window)? / Decimal::from(self.window.period()))
    }
}

impl Indicator for Sma {
    type Output = Price;

    #[inline]
    fn candles_count(&self) -> usize {
        self.window.required()
    }

    fn calc(&self, bars: &[impl Ohlcv]) -> Result<Price> {
        let window = self.window.slice(bars)?;
        self.mean(window.iter().map(|bar| self.source.extract(bar)))
    }

    fn calc_values(&self, values: &[Price]) -> Result<Price> {
        let window = self.window.slice(values)?;
        self.mean(window.iter().copied())
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SMA({}, {}, {})",
            self.window.period(),
            self.window.offset(),
            self.source
        )
    }
}
