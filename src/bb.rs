use std::{fmt::Display, num::NonZero};

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{
    ComputationError, ConfigError, Indicator, IndicatorConfig, Ma, MaType, Ohlcv, Price,
    PriceSource, Result, Sma,
    indicator::{validate_offset, validate_period},
    window::Window,
};

/// Standard deviation multiplier for Bollinger Bands.
///
/// Wraps a positive `Decimal`. Defaults to `2` (the standard Bollinger
/// Bands setting).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct StdDev(Decimal);

impl StdDev {
    /// Creates a new standard deviation multiplier.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStdDev`] if `value` is zero or negative.
    pub fn new(value: Decimal) -> Result<Self, ConfigError> {
        if value <= Decimal::ZERO {
            return Err(ConfigError::InvalidStdDev(value));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl Default for StdDev {
    fn default() -> Self {
        Self(dec!(2))
    }
}

/// Bollinger Bands output: upper, middle, and lower bands.
///
/// ```text
/// upper  = MA + k × σ
/// middle = MA
/// lower  = MA − k × σ
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BbValue {
    upper: Price,
    middle: Price,
    lower: Price,
}

impl BbValue {
    /// Upper band: `MA + k × σ`.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    /// Middle band: the configured moving average.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> Price {
        self.middle
    }

    /// Lower band: `MA − k × σ`.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }

    /// Band width: `upper − lower`.
    ///
    /// Narrow width indicates consolidation (Bollinger squeeze); wide width
    /// indicates high volatility.
    #[inline]
    #[must_use]
    pub fn width(&self) -> Price {
        self.upper - self.lower
    }
}

impl Display for BbValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB(u: {}, m: {}, l: {})",
            self.upper, self.middle, self.lower
        )
    }
}

/// Bollinger Bands (BB).
///
/// A volatility indicator consisting of a middle band (any [`Ma`] variant)
/// with upper and lower bands offset by `k` population standard deviations
/// of the window. The deviation is always measured around an SMA of the
/// same window, independently of the middle band type.
///
/// The square root is taken in decimal arithmetic, so results carry no
/// floating-point rounding.
///
/// # Example
///
/// ```
/// use quantedge_signals::{Bb, Candle, MaType, PriceSource, StdDev};
/// use rust_decimal_macros::dec;
/// use std::num::NonZero;
///
/// let bb = Bb::new(
///     NonZero::new(2).unwrap(),
///     0,
///     PriceSource::Close,
///     StdDev::default(),
///     MaType::Sma,
/// );
/// let bars: Vec<Candle> = [dec!(3), dec!(5)]
///     .into_iter()
///     .map(|p| Candle::new(p, p, p, p))
///     .collect();
///
/// // mean = 4, σ = 1, k = 2
/// let value = bb.calc(&bars).unwrap();
/// assert_eq!(value.upper(), dec!(6));
/// assert_eq!(value.middle(), dec!(4));
/// assert_eq!(value.lower(), dec!(2));
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Bb {
    window: Window,
    source: PriceSource,
    std_dev: StdDev,
    mid: Ma,
    deviation: Sma,
}

impl Bb {
    #[must_use]
    pub fn new(
        period: NonZero<usize>,
        offset: usize,
        source: PriceSource,
        std_dev: StdDev,
        mid_type: MaType,
    ) -> Self {
        Self {
            window: Window::new(period.get(), offset),
            source,
            std_dev,
            mid: Ma::new(mid_type, period, offset, source),
            deviation: Sma::new(period, offset, source),
        }
    }

    /// Middle band engine.
    #[must_use]
    pub fn mid_band(&self) -> &Ma {
        &self.mid
    }

    fn bands(&self, middle: Price, sigma: Price) -> Result<BbValue> {
        let width = sigma.checked_mul(self.std_dev.value());
        let upper = width.and_then(|width| middle.checked_add(width));
        let lower = width.and_then(|width| middle.checked_sub(width));

        match (upper, lower) {
            (Some(upper), Some(lower)) => Ok(BbValue {
                upper,
                middle,
                lower,
            }),
            _ => Err(ComputationError::Overflow.into()),
        }
    }

    /// Population standard deviation of `window` around `mean`.
    fn sigma(&self, mut window: impl Iterator<Item = Price>, mean: Price) -> Result<Price> {
        let squares = window
            .try_fold(Decimal::ZERO, |sum, price| {
                let diff = price.checked_sub(mean)?;
                sum.checked_add(diff.checked_mul(diff)?)
            })
            .ok_or(ComputationError::Overflow)?;
        let variance = squares / Decimal::from(self.window.period());

        variance
            .sqrt()
            .ok_or_else(|| ComputationError::NegativeVariance(variance).into())
    }
}

impl Indicator for Bb {
    type Output = BbValue;

    #[inline]
    fn candles_count(&self) -> usize {
        self.mid.candles_count()
    }

    fn calc(&self, bars: &[impl Ohlcv]) -> Result<BbValue> {
        let middle = self.mid.calc(bars)?;

        let window = self.window.slice(bars)?;
        let mean = self.deviation.calc(bars)?;
        let sigma = self.sigma(window.iter().map(|bar| self.source.extract(bar)), mean)?;

        self.bands(middle, sigma)
    }

    fn calc_values(&self, values: &[Price]) -> Result<BbValue> {
        let middle = self.mid.calc_values(values)?;

        let window = self.window.slice(values)?;
        let mean = self.deviation.calc_values(values)?;
        let sigma = self.sigma(window.iter().copied(), mean)?;

        self.bands(middle, sigma)
    }
}

impl Display for Bb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB({}, {}, {}, {}, {})",
            self.window.period(),
            self.window.offset(),
            self.source,
            self.std_dev.value(),
            self.mid.ma_type(),
        )
    }
}

/// Declarative Bollinger Bands configuration.
///
/// ```json
/// { "period": 20, "stdev": "2", "price": "close", "maType": "sma" }
/// ```
///
/// Every field except `offset` (default `0`) is required.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BbConfig {
    pub period: u32,
    pub stdev: Decimal,
    pub price: PriceSource,
    pub ma_type: MaType,
    #[serde(default)]
    pub offset: usize,
}

impl BbConfig {
    /// Standard bands (`k = 2`, SMA mid band) over closing prices.
    #[must_use]
    pub fn new(period: u32) -> Self {
        Self {
            period,
            stdev: StdDev::default().value(),
            price: PriceSource::Close,
            ma_type: MaType::Sma,
            offset: 0,
        }
    }

    #[must_use]
    pub fn with_stdev(mut self, stdev: Decimal) -> Self {
        self.stdev = stdev;
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: PriceSource) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn with_ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
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
    /// - [`ConfigError::InvalidStdDev`] when `stdev` is not positive.
    pub fn build(&self) -> Result<Bb, ConfigError> {
        let period = validate_period(self.period)?;
        let offset = validate_offset(self.offset)?;
        let std_dev = StdDev::new(self.stdev)?;

        Ok(Bb::new(period, offset, self.price, std_dev, self.ma_type))
    }
}

impl IndicatorConfig for BbConfig {
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

    fn validate(&self) -> Result<(), ConfigError> {
        self.build().map(|_| ())
    }
}

impl Display for BbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BbConfig({}, {}, {}, {}, {})",
            self.period, self.offset, self.price, self.stdev, self.ma_type
        )
    }
}
