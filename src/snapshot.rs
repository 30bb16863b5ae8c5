use serde::Serialize;

use crate::{Price, Result};

/// Result of one tool evaluation: the values it computed and whether its
/// condition held.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<D> {
    pub conditions_met: bool,
    pub data: D,
}

impl<D> Snapshot<D> {
    #[must_use]
    pub fn new(conditions_met: bool, data: D) -> Self {
        Self {
            conditions_met,
            data,
        }
    }
}

/// Holds the last recorded [`Snapshot`] of a tool.
///
/// Capacity is exactly one: each record overwrites the previous value, and
/// a failed evaluation clears it back to the zero snapshot so stale values
/// never outlive the call that invalidated them.
#[derive(Clone, Default, Debug)]
pub struct SnapshotStore<D> {
    last: Snapshot<D>,
}

impl<D: Default + std::fmt::Debug> SnapshotStore<D> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: Snapshot::default(),
        }
    }

    /// Stores the outcome of an evaluation and passes its verdict on.
    ///
    /// # Errors
    ///
    /// Returns the evaluation error unchanged after clearing the store.
    pub fn record(&mut self, outcome: Result<Snapshot<D>>) -> Result<bool> {
        match outcome {
            Ok(snapshot) => {
                tracing::debug!(
                    conditions_met = snapshot.conditions_met,
                    data = ?snapshot.data,
                    "snapshot recorded"
                );
                let met = snapshot.conditions_met;
                self.last = snapshot;
                Ok(met)
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> &Snapshot<D> {
        &self.last
    }

    pub fn clear(&mut self) {
        self.last = Snapshot::default();
    }
}

/// Values recorded by [`BbTool`](crate::BbTool).
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BbSnapshot {
    pub upper: Price,
    pub middle: Price,
    pub lower: Price,
    /// Selected band after the optional shift.
    pub shifted_band: Price,
    /// Resolved market value.
    pub value: Price,
}

/// Values recorded by [`MaSpreadTool`](crate::MaSpreadTool).
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadSnapshot {
    pub spread: Price,
    pub ma1: Price,
    pub ma2: Price,
}

/// Values recorded by [`PriceMaTool`](crate::PriceMaTool).
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceMaSnapshot {
    pub ma: Price,
    pub shifted_ma: Price,
    pub value: Price,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComputationError, Error};
    use rust_decimal_macros::dec;

    fn spread(value: Price) -> Snapshot<SpreadSnapshot> {
        Snapshot::new(
            true,
            SpreadSnapshot {
                spread: value,
                ma1: dec!(10),
                ma2: dec!(10) - value,
            },
        )
    }

    #[test]
    fn starts_empty() {
        let store = SnapshotStore::<SpreadSnapshot>::new();
        assert_eq!(store.last(), &Snapshot::default());
        assert!(!store.last().conditions_met);
    }

    #[test]
    fn record_overwrites() {
        let mut store = SnapshotStore::new();
        assert_eq!(store.record(Ok(spread(dec!(1)))), Ok(true));
        assert_eq!(store.record(Ok(spread(dec!(2)))), Ok(true));
        assert_eq!(store.last(), &spread(dec!(2)));
    }

    #[test]
    fn error_clears_previous_snapshot() {
        let mut store = SnapshotStore::new();
        store.record(Ok(spread(dec!(1)))).unwrap();

        let err = Error::Computation(ComputationError::DivisionByZero);
        assert_eq!(store.record(Err(err.clone())), Err(err));
        assert_eq!(store.last(), &Snapshot::default());
    }

    #[test]
    fn serializes_camel_case() {
        let snapshot = Snapshot::new(
            false,
            PriceMaSnapshot {
                ma: dec!(10),
                shifted_ma: dec!(10.1),
                value: dec!(9.5),
            },
        );
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "conditionsMet": false,
                "data": { "ma": "10", "shiftedMa": "10.1", "value": "9.5" }
            })
        );
    }
}
