//! Property-based tests for the screener query compiler.

use proptest::prelude::*;

use pulse_screener::{compile, FilterId, Metric, ScreenerFilterSelection, ScreenerRow};

// =============================================================================
// Strategy helpers
// =============================================================================

/// A recognized filter id with one of its labels (or "Any")
fn known_pair() -> impl Strategy<Value = (String, String)> {
    prop::sample::select(FilterId::ALL.to_vec()).prop_flat_map(|id| {
        let mut labels: Vec<String> = id.labels().iter().map(|l| l.to_string()).collect();
        labels.push("Any".to_string());
        prop::sample::select(labels).prop_map(move |label| (id.as_str().to_string(), label))
    })
}

/// Anything: known pairs, unknown ids, garbage labels
fn any_pair() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        3 => known_pair(),
        1 => ("[a-zA-Z]{1,10}", ".{0,12}"),
    ]
}

fn selection_strategy() -> impl Strategy<Value = ScreenerFilterSelection> {
    prop::collection::vec(any_pair(), 0..8).prop_map(|pairs| pairs.into_iter().collect())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn compile_is_idempotent(selection in selection_strategy()) {
        prop_assert_eq!(compile(&selection), compile(&selection));
    }

    #[test]
    fn defaults_always_present(selection in selection_strategy()) {
        let params = compile(&selection);
        prop_assert!(params.is_actively_trading);
        prop_assert_eq!(params.limit, 100);

        let pairs = params.to_query_pairs();
        prop_assert!(pairs.iter().any(|(k, v)| *k == "limit" && v == "100"));
        prop_assert!(pairs.iter().any(|(k, v)| *k == "isActivelyTrading" && v == "true"));
    }

    #[test]
    fn ranges_are_well_formed(selection in selection_strategy()) {
        let params = compile(&selection);
        for metric in Metric::ALL {
            if let Some(bounds) = params.bound(metric) {
                prop_assert!(!bounds.is_unbounded());
                if let (Some(lo), Some(hi)) = (bounds.more_than, bounds.less_than) {
                    prop_assert!(lo < hi);
                }
            }
        }
    }

    #[test]
    fn lower_bound_inclusive_upper_exclusive(pair in known_pair()) {
        let selection: ScreenerFilterSelection = std::iter::once(pair).collect();
        let params = compile(&selection);

        for metric in Metric::ALL {
            let Some(bounds) = params.bound(metric) else { continue };
            if let Some(lo) = bounds.more_than {
                prop_assert!(bounds.contains(lo));
            }
            if let Some(hi) = bounds.less_than {
                prop_assert!(!bounds.contains(hi));
            }
        }
    }

    #[test]
    fn unrecognized_ids_contribute_nothing(id in "zz[a-z]{1,8}", label in ".{0,12}") {
        let selection = ScreenerFilterSelection::new().with(id, label);
        prop_assert_eq!(compile(&selection), compile(&ScreenerFilterSelection::new()));
    }
}

#[test]
fn compiled_query_admits_endpoint_rows() {
    let selection = ScreenerFilterSelection::new()
        .with("price", "$10 - $50")
        .with("pe", "Under 10")
        .with("debtToEquity", "No Debt")
        .with("exchange", "NYSE");
    let params = compile(&selection);

    // Endpoint rows carry price and exchange but no fundamentals
    let row: ScreenerRow = serde_json::from_str(
        r#"{"symbol":"KO","price":10.0,"exchangeShortName":"NYSE","isActivelyTrading":true}"#,
    )
    .unwrap();
    assert!(params.admits(&row));

    let too_pricey = ScreenerRow { price: Some(50.0), ..row.clone() };
    assert!(!params.admits(&too_pricey));

    let levered = ScreenerRow { debt_to_equity: Some(0.01), ..row };
    assert!(!params.admits(&levered));
}
