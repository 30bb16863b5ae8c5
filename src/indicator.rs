use rust_decimal::Decimal;

use crate::{
    ComputationError, ConfigError, MAX_OFFSET, MAX_PERIOD, MIN_PERIOD, Ohlcv, Price, PriceSource,
    Result,
};

use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

/// Declarative configuration of an indicator.
///
/// Configs arrive deserialized from the strategy definition and must pass
/// [`validate`](IndicatorConfig::validate) before an engine is built.
pub trait IndicatorConfig: Debug + Display {
    /// Window length in bars, as configured.
    fn period(&self) -> u32;

    /// Number of newest bars skipped before the window.
    fn offset(&self) -> usize;

    /// Price field read from each bar.
    fn price(&self) -> PriceSource;

    /// Checks every field of the config.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_period(self.period())?;
        validate_offset(self.offset())?;
        Ok(())
    }
}

/// Accepts periods in `MIN_PERIOD..=MAX_PERIOD`.
///
/// # Errors
///
/// [`ConfigError::InvalidPeriod`] when out of range.
pub fn validate_period(period: u32) -> Result<NonZero<usize>, ConfigError> {
    if !(MIN_PERIOD..=MAX_PERIOD).contains(&period) {
        return Err(ConfigError::InvalidPeriod(period));
    }

    usize::try_from(period)
        .ok()
        .and_then(NonZero::new)
        .ok_or(ConfigError::InvalidPeriod(period))
}

/// Accepts offsets up to `MAX_OFFSET`.
///
/// # Errors
///
/// [`ConfigError::InvalidOffset`] when too large.
pub fn validate_offset(offset: usize) -> Result<usize, ConfigError> {
    if offset > MAX_OFFSET {
        return Err(ConfigError::InvalidOffset(offset));
    }

    Ok(offset)
}

/// Sums `values`, failing instead of panicking when the total leaves the
/// `Decimal` range.
pub(crate) fn checked_sum(mut values: impl Iterator<Item = Price>) -> Result<Price> {
    values.try_fold(Decimal::ZERO, |sum, value| {
        sum.checked_add(value)
            .ok_or_else(|| ComputationError::Overflow.into())
    })
}

/// A technical indicator computed over a window of bars.
///
/// Engines are immutable value types: every call recomputes from the bars
/// it is given, and repeated calls on the same input return identical
/// results.
///
/// # Example
///
/// ```
/// use quantedge_signals::{Candle, Indicator, PriceSource, Sma};
/// use rust_decimal_macros::dec;
/// use std::num::NonZero;
///
/// let sma = Sma::new(NonZero::new(3).unwrap(), 0, PriceSource::Close);
/// let bars: Vec<Candle> = [dec!(1), dec!(2), dec!(3)]
///     .into_iter()
///     .map(|p| Candle::new(p, p, p, p))
///     .collect();
///
/// assert_eq!(sma.candles_count(), 3);
/// assert_eq!(sma.calc(&bars), Ok(dec!(2)));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Computed output type. [`Price`] for moving averages,
    /// a struct for composite ones (e.g. Bollinger Bands).
    type Output: Send + Sync + Display + Debug;

    /// Minimum number of bars [`calc`](Indicator::calc) needs.
    fn candles_count(&self) -> usize;

    /// Computes the indicator from bars ordered oldest first.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientData`](crate::Error::InsufficientData) when
    /// fewer than [`candles_count`](Indicator::candles_count) bars are given.
    fn calc(&self, bars: &[impl Ohlcv]) -> Result<Self::Output>;

    /// Same as [`calc`](Indicator::calc) over raw values, using identical
    /// window boundaries.
    ///
    /// # Errors
    ///
    /// See [`calc`](Indicator::calc).
    fn calc_values(&self, values: &[Price]) -> Result<Self::Output>;
}
