use crate::{ConfigError, Ohlcv, Price};

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Price field extracted from an [`Ohlcv`] bar before feeding into an
/// indicator.
///
/// Parsed from its lowercase key (`open`, `high`, `low`, `close`). Keys are
/// expected to be trimmed and lowercased by the config loader.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    #[default]
    Close,
}

impl PriceSource {
    /// All recognised selectors.
    pub const ALL: [Self; 4] = [Self::Open, Self::High, Self::Low, Self::Close];

    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv) -> Price {
        match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Low => ohlcv.low(),
            Self::Close => ohlcv.close(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
        }
    }
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidPriceSource(s.to_owned()))
    }
}

impl TryFrom<String> for PriceSource {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::Bar;
    use rust_decimal_macros::dec;

    fn bar() -> Bar {
        Bar::new(dec!(10), dec!(30), dec!(5), dec!(20))
    }

    mod extract {
        use super::*;

        #[test]
        fn open() {
            assert_eq!(PriceSource::Open.extract(&bar()), dec!(10));
        }

        #[test]
        fn high() {
            assert_eq!(PriceSource::High.extract(&bar()), dec!(30));
        }

        #[test]
        fn low() {
            assert_eq!(PriceSource::Low.extract(&bar()), dec!(5));
        }

        #[test]
        fn close() {
            assert_eq!(PriceSource::Close.extract(&bar()), dec!(20));
        }
    }

    mod parse {
        use super::*;

        #[test]
        fn every_key_round_trips() {
            for source in PriceSource::ALL {
                assert_eq!(source.to_string().parse::<PriceSource>(), Ok(source));
            }
        }

        #[test]
        fn rejects_unknown_key() {
            assert_eq!(
                "volume".parse::<PriceSource>(),
                Err(ConfigError::InvalidPriceSource("volume".into()))
            );
        }

        #[test]
        fn rejects_untrimmed_key() {
            assert!(" close".parse::<PriceSource>().is_err());
        }

        #[test]
        fn deserialize_rejects_unknown_key() {
            let err = serde_json::from_str::<PriceSource>(r#""hl2""#).unwrap_err();
            assert!(err.to_string().contains("unknown price source `hl2`"));
        }

        #[test]
        fn default_is_close() {
            assert_eq!(PriceSource::default(), PriceSource::Close);
        }
    }
}
