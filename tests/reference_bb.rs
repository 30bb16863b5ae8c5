mod fixtures;

use fixtures::{RefBbValue, assert_near, load_bb_ref, load_reference_ohlcvs};
use quantedge_signals::{Bb, BbConfig, Error, MaType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The square root is iterated to full decimal precision; the tolerance
/// only covers rounding of the 28-digit intermediate values.
const TOLERANCE: Decimal = dec!(0.00000001);

fn assert_matches_reference(bb: &Bb, path: &str, label: &str) {
    let bars = load_reference_ohlcvs();
    let reference: Vec<RefBbValue> = load_bb_ref(path);

    let mut ref_idx = 0;
    for end in 1..=bars.len() {
        let bar = &bars[end - 1];
        let result = bb.calc(&bars[..end]);

        if ref_idx < reference.len() && bar.open_time == reference[ref_idx].open_time {
            let value =
                result.unwrap_or_else(|e| panic!("{label} failed at t={}: {e}", bar.open_time));
            let expected = &reference[ref_idx];
            let ctx = format!("{label} at bar {ref_idx} (t={})", bar.open_time);

            assert_near(value.upper(), expected.upper, TOLERANCE, &format!("{ctx} upper"));
            assert_near(value.middle(), expected.middle, TOLERANCE, &format!("{ctx} middle"));
            assert_near(value.lower(), expected.lower, TOLERANCE, &format!("{ctx} lower"));
            ref_idx += 1;
        } else {
            assert!(
                matches!(result, Err(Error::InsufficientData { .. })),
                "{label} produced {result:?} before its window filled (t={})",
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
fn bb_20_2_close_matches_reference() {
    let bb = BbConfig::new(20).build().unwrap();
    assert_matches_reference(&bb, "tests/fixtures/data/bb-20-2-close.csv", "BB(20, 2)");
}

#[test]
fn bb_14_1_5_ema_close_matches_reference() {
    let bb = BbConfig::new(14)
        .with_stdev(dec!(1.5))
        .with_ma_type(MaType::Ema)
        .build()
        .unwrap();
    assert_eq!(bb.candles_count(), 28);
    assert_matches_reference(&bb, "tests/fixtures/data/bb-14-1.5-ema-close.csv", "BB(14, 1.5, ema)");
}

#[test]
fn bands_are_symmetric_around_middle() {
    let bars = load_reference_ohlcvs();
    let bb = BbConfig::new(20).build().unwrap();

    for end in bb.candles_count()..=bars.len() {
        let value = bb.calc(&bars[..end]).unwrap();
        assert_near(
            value.upper() - value.middle(),
            value.middle() - value.lower(),
            dec!(0.0000000000000000001),
            &format!("BB(20, 2) symmetry at bar {end}"),
        );
        assert!(value.width() >= Decimal::ZERO);
    }
}
