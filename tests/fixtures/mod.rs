#![allow(dead_code)]

use quantedge_signals::{Candle, Ohlcv, Price, Ticker};
use rust_decimal::Decimal;
use serde::{Deserialize, de::DeserializeOwned};

/// Hourly OHLC bar parsed from the fixture CSV.
///
/// Prices go through `rust_decimal::serde::str` so that no value ever
/// passes through `f64`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub open: Price,
    #[serde(with = "rust_decimal::serde::str")]
    pub high: Price,
    #[serde(with = "rust_decimal::serde::str")]
    pub low: Price,
    #[serde(with = "rust_decimal::serde::str")]
    pub close: Price,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }
}

impl From<&RefBar> for Candle {
    fn from(bar: &RefBar) -> Self {
        Candle::new(bar.open, bar.high, bar.low, bar.close)
    }
}

/// Reference value keyed by the open time of the newest bar.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub open_time: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub expected: Price,
}

/// Reference BB value keyed by the open time of the newest bar.
#[derive(Debug, Deserialize)]
pub struct RefBbValue {
    pub open_time: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub upper: Price,
    #[serde(with = "rust_decimal::serde::str")]
    pub middle: Price,
    #[serde(with = "rust_decimal::serde::str")]
    pub lower: Price,
}

const OHLCV_PATH: &str = "tests/fixtures/data/bars-1h.csv";

/// Load the reference bars, oldest first.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Load single-value reference data (SMA, EMA, WMA).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load BB reference data (upper, middle, lower).
pub fn load_bb_ref(path: &str) -> Vec<RefBbValue> {
    load_records(path, "invalid BB reference record")
}

/// Load a JSON config fixture.
pub fn load_json<D: DeserializeOwned>(path: &str) -> D {
    let text =
        std::fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("invalid JSON in {path}: {e}"))
}

/// Ticker quoting the close of `bar` with a fixed one-unit spread.
pub fn ticker_at(bar: &RefBar) -> Ticker {
    Ticker::new(bar.close, bar.close - Decimal::ONE, bar.close + Decimal::ONE)
}

/// Assert two decimals are within tolerance.
pub fn assert_near(actual: Decimal, expected: Decimal, tolerance: Decimal, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected}, got {actual}, diff {diff} > tolerance {tolerance}"
    );
}

/// Generate a reference test for a single-value indicator.
///
/// Every prefix of the fixture is fed to the engine. Prefixes without a
/// reference value must fail with `InsufficientData`; every other prefix
/// must match its reference value.
///
/// Usage: `reference_test!(sma_20, Sma::new(nz(20), 0, PriceSource::Close), "tests/fixtures/data/sma-20-close.csv", dec!(0.00000001));`
#[allow(unused_macros)]
macro_rules! reference_test {
    ($name:ident, $indicator:expr, $ref_path:expr, $tolerance:expr) => {
        mod $name {
            use super::fixtures::*;
            use quantedge_signals::*;
            use rust_decimal_macros::dec;
            use std::num::NonZero;

            fn nz(n: usize) -> NonZero<usize> {
                NonZero::new(n).unwrap()
            }

            #[test]
            fn matches_reference() {
                let bars = load_reference_ohlcvs();
                let reference = load_ref_values($ref_path);
                let indicator = $indicator;

                let mut ref_idx = 0;
                for end in 1..=bars.len() {
                    let bar = &bars[end - 1];
                    let result = indicator.calc(&bars[..end]);

                    if ref_idx < reference.len() && bar.open_time == reference[ref_idx].open_time {
                        let value = result.unwrap_or_else(|e| {
                            panic!("{} failed at t={}: {e}", stringify!($name), bar.open_time)
                        });
                        assert_near(
                            value,
                            reference[ref_idx].expected,
                            $tolerance,
                            &format!(
                                "{} at bar {ref_idx} (t={})",
                                stringify!($name),
                                bar.open_time
                            ),
                        );
                        ref_idx += 1;
                    } else {
                        assert!(
                            matches!(result, Err(Error::InsufficientData { .. })),
                            "{} produced {result:?} before its window filled (t={})",
                            stringify!($name),
                            bar.open_time
                        );
                    }
                }

                assert_eq!(
                    ref_idx,
                    reference.len(),
                    "not all reference values checked: {ref_idx}/{}",
                    reference.len()
                );
            }

            #[test]
            fn first_value_needs_exactly_candles_count_bars() {
                let bars = load_reference_ohlcvs();
                let indicator = $indicator;
                let needed = indicator.candles_count();

                assert!(indicator.calc(&bars[..needed - 1]).is_err());
                assert!(indicator.calc(&bars[..needed]).is_ok());
            }

            #[test]
            fn raw_values_match_bars() {
                let bars = load_reference_ohlcvs();
                let indicator = $indicator;

                let values: Vec<Price> = bars.iter().map(|bar| bar.close).collect();
                let flat: Vec<Candle> = values.iter().map(|&p| Candle::new(p, p, p, p)).collect();
                assert_eq!(indicator.calc_values(&values), indicator.calc(&flat));
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use reference_test;

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
