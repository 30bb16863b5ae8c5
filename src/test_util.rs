// src/test_util.rs

use crate::{Ohlcv, Price, Ticker};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::num::NonZero;

/// Asserts that two `Decimal` values agree to `$dp` decimal places.
macro_rules! assert_dp {
    ($actual:expr, $expected:expr, $dp:expr) => {{
        let (a, e): (rust_decimal::Decimal, rust_decimal::Decimal) = ($actual, $expected);
        assert_eq!(
            a.round_dp($dp),
            e.round_dp($dp),
            "assert_dp failed: actual={a}, expected={e}",
        );
    }};
}

pub(crate) use assert_dp;

pub struct Bar {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Bar {
    pub fn new(open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }
}

impl Ohlcv for Bar {
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

/// Convenience: bar with OHLC all equal to `price`.
pub fn bar(price: Price) -> Bar {
    Bar::new(price, price, price, price)
}

/// Flat bars from whole-number prices, oldest first.
pub fn closes(prices: &[i64]) -> Vec<Bar> {
    prices.iter().map(|&p| bar(Decimal::from(p))).collect()
}

pub fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).unwrap()
}

pub fn ticker(last: Price) -> Ticker {
    Ticker {
        last,
        bid: last - dec!(0.5),
        ask: last + dec!(0.5),
    }
}
