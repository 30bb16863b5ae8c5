use std::{fmt::Display, num::NonZero};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{ComputationError, Indicator, Ohlcv, Price, PriceSource, Result, Sma, window::Window};

/// Exponential Moving Average (EMA).
///
/// Uses the standard smoothing factor `α = 2 / (period + 1)`:
///
/// ```text
/// EMA = (price − prev_EMA) × α + prev_EMA
/// ```
///
/// # Seeding
///
/// The recursion starts from an SMA over the `period` bars that precede
/// the smoothing window, so an EMA needs two full periods of history:
///
/// ```text
/// |<- seed SMA (period) ->|<- smoothed (period) ->|<- offset ->|
/// ```
///
/// [`candles_count`](Indicator::candles_count) is therefore
/// `2 × period + offset`.
///
/// # Example
///
/// ```
/// use quantedge_signals::{Candle, Ema, PriceSource};
/// use rust_decimal_macros::dec;
/// use std::num::NonZero;
///
/// let ema = Ema::new(NonZero::new(3).unwrap(), 0, PriceSource::Close);
/// let bars: Vec<Candle> = [10, 10, 10, 10, 20, 30]
///     .into_iter()
///     .map(|p| {
///         let p = p.into();
///         Candle::new(p, p, p, p)
///     })
///     .collect();
///
/// // seed = 10, α = 0.5: 10 → 15 → 22.5
/// assert_eq!(ema.candles_count(), 6);
/// assert_eq!(ema.calc(&bars), Ok(dec!(22.5)));
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Ema {
    window: Window,
    source: PriceSource,
    seed: Sma,
    alpha: Decimal,
}

impl Ema {
    #[must_use]
    pub fn new(period: NonZero<usize>, offset: usize, source: PriceSource) -> Self {
        Self {
            window: Window::new(period.get(), offset),
            source,
            seed: Sma::new(period, period.get().saturating_add(offset), source),
            alpha: dec!(2) / (Decimal::from(period.get()) + Decimal::ONE),
        }
    }

    #[inline]
    fn smooth(&self, seed: Price, mut window: impl Iterator<Item = Price>) -> Result<Price> {
        window
            .try_fold(seed, |ema, price| {
                price
                    .checked_sub(ema)
                    .and_then(|delta| delta.checked_mul(self.alpha))
                    .and_then(|step| step.checked_add(ema))
            })
            .ok_or_else(|| ComputationError::Overflow.into())
    }
}

impl Indicator for Ema {
    type Output = Price;

    #[inline]
    fn candles_count(&self) -> usize {
        self.seed.candles_count()
    }

    fn calc(&self, bars: &[impl Ohlcv]) -> Result<Price> {
        Window::ensure(self.candles_count(), bars.len())?;

        let seed = self.seed.calc(bars)?;
        let window = self.window.slice(bars)?;

        self.smooth(seed, window.iter().map(|bar| self.source.extract(bar)))
    }

    fn calc_values(&self, values: &[Price]) -> Result<Price> {
        Window::ensure(self.candles_count(), values.len())?;

        let seed = self.seed.calc_values(values)?;
        let window = self.window.slice(values)?;

        self.smooth(seed, window.iter().copied())
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EMA({}, {}, {})",
            self.window.period(),
            self.window.offset(),
            self.source
        )
    }
}
