use std::{fmt::Display, num::NonZero};

use rust_decimal::Decimal;

use crate::{ComputationError, Indicator, Ohlcv, Price, PriceSource, Result, window::Window};

/// Weighted Moving Average (WMA).
///
/// Linearly weighted mean over the same window as [`Sma`](crate::Sma).
/// Weights run `1, 2, …, period` from the oldest to the newest bar of the
/// window:
///
/// ```text
/// WMA = Σ(priceᵢ × i) / Σi,   i = 1..=period
/// ```
///
/// # Example
///
/// ```rust
/// use quantedge_signals::{Candle, PriceSource, Wma};
/// use rust_decimal_macros::dec;
/// use std::num::NonZero;
///
/// let wma = Wma::new(NonZero::new(3).unwrap(), 0, PriceSource::Close);
/// let bars: Vec<Candle> = [dec!(10), dec!(40), dec!(30)]
///     .into_iter()
///     .map(|p| Candle::new(p, p, p, p))
///     .collect();
///
/// // (10×1 + 40×2 + 30×3) / 6
/// assert_eq!(wma.calc(&bars), Ok(dec!(30)));
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Wma {
    window: Window,
    source: PriceSource,
}

impl Wma {
    #[must_use]
    pub fn new(period: NonZero<usize>, offset: usize, source: PriceSource) -> Self {
        Self {
            window: Window::new(period.get(), offset),
            source,
        }
    }

    fn weighted_mean(&self, window: impl Iterator<Item = Price>) -> Result<Price> {
        let period = self.window.period();
        let weighted = window
            .zip(1..=period)
            .try_fold(Decimal::ZERO, |sum, (price, weight)| {
                price
                    .checked_mul(Decimal::from(weight))
                    .and_then(|term| sum.checked_add(term))
            })
            .ok_or(ComputationError::Overflow)?;
        // 1 + 2 + … + n
        let weights = Decimal::from(period) * Decimal::from(period + 1) / Decimal::TWO;

        Ok(weighted / weights)
    }
}

impl Indicator for Wma {
    type Output = Price;

    #[inline]
    fn candles_count(&self) -> usize {
        self.window.required()
    }

    fn calc(&self, bars: &[impl Ohlcv]) -> Result<Price> {
        let window = self.window.slice(bars)?;
        self.weighted_mean(window.iter().map(|bar| self.source.extract(bar)))
    }

    fn calc_values(&self, values: &[Price]) -> Result<Price> {
        let window = self.window.slice(values)?;
        self.weighted_mean(window.iter().copied())
    }
}

impl Display for Wma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WMA({}, {}, {})",
            self.window.period(),
            self.window.offset(),
            self.source
        )
    }
}
