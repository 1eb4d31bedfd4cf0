use chrono::{Datelike, Duration, NaiveDate, Weekday};
use options_quote::metrics::enrich_and_filter;
use options_quote::models::{FilterRange, OptionContract, OptionType};
use options_quote::resolve_next_friday;
use proptest::prelude::*;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // 1970-01-01 .. ~2100
    (0i64..47_000i64).prop_map(|d| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + Duration::days(d))
}

fn arb_contract() -> impl Strategy<Value = OptionContract> {
    // Strikes and premiums in cents, strictly positive strikes
    (1u32..100_000u32, 0u32..5_000u32, 0u32..5_000u32, any::<bool>()).prop_map(|(strike, bid, ask, call)| {
        let option_type = if call { OptionType::Call } else { OptionType::Put };
        OptionContract::new(
            format!("X-{}", strike),
            option_type,
            f64::from(strike) / 100.0,
            f64::from(bid) / 100.0,
            f64::from(ask) / 100.0,
        )
    })
}

fn arb_spot() -> impl Strategy<Value = f64> {
    (1u32..100_000u32).prop_map(|c| f64::from(c) / 100.0)
}

fn arb_range() -> impl Strategy<Value = FilterRange> {
    (-60i32..60i32, -60i32..60i32).prop_map(|(a, b)| FilterRange::new(f64::from(a), f64::from(b)))
}

proptest! {
    #[test]
    fn next_friday_is_a_friday_within_the_week(d in arb_date()) {
        let f = resolve_next_friday(d).unwrap();
        prop_assert_eq!(f.weekday(), Weekday::Fri);
        prop_assert!(f >= d);
        prop_assert!((f - d).num_days() < 7);
        if d.weekday() == Weekday::Fri {
            prop_assert_eq!(f, d);
        }
    }

    #[test]
    fn filter_output_is_an_in_range_subsequence(
        chain in proptest::collection::vec(arb_contract(), 0..60),
        spot in arb_spot(),
        range in arb_range(),
    ) {
        let out = enrich_and_filter(&chain, spot, range).unwrap();
        prop_assert!(out.len() <= chain.len());

        for row in &out {
            prop_assert!(range.min <= row.incremental_percentage);
            prop_assert!(row.incremental_percentage <= range.max);
        }

        // Stable: output rows appear in the same relative order as the input
        let mut cursor = chain.iter();
        for row in &out {
            prop_assert!(cursor.any(|c| c == &row.contract));
        }
    }

    #[test]
    fn inverted_range_selects_nothing(
        chain in proptest::collection::vec(arb_contract(), 0..30),
        spot in arb_spot(),
        lo in 1i32..50i32,
    ) {
        let range = FilterRange::new(f64::from(lo), -f64::from(lo));
        prop_assert!(enrich_and_filter(&chain, spot, range).unwrap().is_empty());
    }

    #[test]
    fn enrichment_is_deterministic(
        chain in proptest::collection::vec(arb_contract(), 0..30),
        spot in arb_spot(),
        range in arb_range(),
    ) {
        let a = enrich_and_filter(&chain, spot, range).unwrap();
        let b = enrich_and_filter(&chain, spot, range).unwrap();
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(x.incremental_percentage.to_bits(), y.incremental_percentage.to_bits());
            prop_assert_eq!(x.bid_ratio.to_bits(), y.bid_ratio.to_bits());
            prop_assert_eq!(x.ask_ratio.to_bits(), y.ask_ratio.to_bits());
        }
    }

    #[test]
    fn filtering_never_changes_ratios(
        chain in proptest::collection::vec(arb_contract(), 1..30),
        spot in arb_spot(),
    ) {
        let all = enrich_and_filter(&chain, spot, FilterRange::new(f64::MIN, f64::MAX)).unwrap();
        prop_assert_eq!(all.len(), chain.len());
        let narrow = enrich_and_filter(&chain, spot, FilterRange::new(-10.0, 10.0)).unwrap();
        for row in &narrow {
            prop_assert!(all.contains(row));
        }
    }
}
