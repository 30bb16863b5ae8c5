use rust_decimal::Decimal;
use thiserror::Error;

use crate::MaType;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by indicator engines and tools.
///
/// Nothing in this crate logs or swallows an error: every failure is
/// returned to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration rejected at construction or validation time.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Fewer bars (or values) than the engine's window requires.
    #[error("insufficient data: {required} bars required, {available} available")]
    InsufficientData { required: usize, available: usize },

    /// Arithmetic failure during evaluation.
    #[error("computation failed: {0}")]
    Computation(#[from] ComputationError),
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("period {0} is outside {min}..={max}", min = crate::MIN_PERIOD, max = crate::MAX_PERIOD)]
    InvalidPeriod(u32),

    #[error("offset {0} exceeds {max}", max = crate::MAX_OFFSET)]
    InvalidOffset(usize),

    #[error("unknown price source `{0}`")]
    InvalidPriceSource(String),

    #[error("unknown moving average type `{0}`")]
    InvalidMaType(String),

    #[error("standard deviation multiplier must be positive, got {0}")]
    InvalidStdDev(Decimal),

    #[error("shift value must not be zero")]
    ZeroShift,

    #[error("unknown band `{0}`")]
    InvalidBand(String),

    #[error("unknown comparison relation `{0}`")]
    InvalidRelation(String),

    #[error("comparison relation is not set")]
    MissingComparison,

    #[error("unknown measure `{0}`")]
    InvalidMeasure(String),

    #[error("unknown spread base `{0}`")]
    InvalidSpreadBase(String),

    #[error("unknown value source `{0}`")]
    UnknownValueSource(String),

    #[error("value source `{0}` is not allowed here")]
    ValueSourceNotAllowed(String),

    /// Two moving averages of one type that would read the same window.
    #[error("{ma_type} moving averages share the same window of {candles} bars")]
    SamePeriodMas { ma_type: MaType, candles: usize },
}

/// Arithmetic failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputationError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("variance {0} is negative")]
    NegativeVariance(Decimal),

    /// Intermediate value outside the range of [`Decimal`].
    #[error("decimal overflow")]
    Overflow,
}
