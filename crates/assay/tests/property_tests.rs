//! Property-based tests for the analysis invariants.
//!
//! ```bash
//! cargo test -p assay --test property_tests
//! PROPTEST_CASES=10000 cargo test -p assay --test property_tests
//! ```

use indexmap::IndexMap;
use proptest::prelude::*;

use assay::drift::{SchemaChange, SchemaDiffer};
use assay::input::Parser;
use assay::readiness::split_statements;
use assay::stats::{chi_square_two_sample, ks_two_sample, shannon_entropy};
use assay::{Column, ColumnType, Table, Value};

fn int_column(name: &str) -> Column {
    Column::new(name, ColumnType::Integer, vec![Value::Integer(1)])
}

fn text_column(name: &str) -> Column {
    Column::new(name, ColumnType::Text, vec![Value::Text("x".to_string())])
}

/// A one-row table from (name, is_text) pairs with unique names.
fn table_from(columns: &[(String, bool)]) -> Table {
    let columns = columns
        .iter()
        .map(|(name, text)| if *text { text_column(name) } else { int_column(name) })
        .collect();
    Table::new(columns).unwrap()
}

fn unique_columns() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::btree_map("[a-f]{1,2}", any::<bool>(), 0..8)
        .prop_map(|m| m.into_iter().collect())
}

fn sorted_changes(mut changes: Vec<SchemaChange>) -> Vec<String> {
    let mut out: Vec<String> = changes.drain(..).map(|c| c.to_string()).collect();
    out.sort();
    out
}

// =============================================================================
// Schema diff
// =============================================================================

proptest! {
    /// Swapping inputs turns additions into removals and reverses type changes.
    #[test]
    fn schema_diff_is_symmetric(a in unique_columns(), b in unique_columns()) {
        let (ta, tb) = (table_from(&a), table_from(&b));
        let differ = SchemaDiffer::new();

        let forward: Vec<SchemaChange> = differ.diff(&ta, &tb).iter().map(|c| c.reversed()).collect();
        let backward = differ.diff(&tb, &ta);

        prop_assert_eq!(sorted_changes(forward), sorted_changes(backward));
    }

    #[test]
    fn schema_diff_of_self_is_empty(a in unique_columns()) {
        let t = table_from(&a);
        prop_assert!(SchemaDiffer::new().diff(&t, &t).is_empty());
    }
}

// =============================================================================
// Statistics
// =============================================================================

proptest! {
    #[test]
    fn entropy_is_bounded(counts in prop::collection::vec(1usize..50, 1..20)) {
        let entropy = shannon_entropy(counts.iter().copied());
        let max = (counts.len() as f64).log2();

        prop_assert!(entropy >= -1e-12);
        prop_assert!(entropy <= max + 1e-9);
    }

    #[test]
    fn uniform_entropy_is_log2_n(n in 1usize..64, count in 1usize..10) {
        let entropy = shannon_entropy(std::iter::repeat_n(count, n));
        prop_assert!((entropy - (n as f64).log2()).abs() < 1e-9);
    }

    #[test]
    fn ks_outcome_in_unit_interval(
        a in prop::collection::vec(-1e6f64..1e6, 1..100),
        b in prop::collection::vec(-1e6f64..1e6, 1..100),
    ) {
        let outcome = ks_two_sample(&a, &b).unwrap();
        prop_assert!((0.0..=1.0).contains(&outcome.statistic));
        prop_assert!((0.0..=1.0).contains(&outcome.p_value));
    }

    #[test]
    fn ks_self_comparison(a in prop::collection::vec(-1e6f64..1e6, 1..100)) {
        let outcome = ks_two_sample(&a, &a).unwrap();
        prop_assert_eq!(outcome.statistic, 0.0);
        prop_assert_eq!(outcome.p_value, 1.0);
    }

    #[test]
    fn chi_square_self_comparison(counts in prop::collection::vec(1usize..100, 1..10)) {
        let observed: IndexMap<String, usize> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| (format!("c{}", i), *c))
            .collect();
        let outcome = chi_square_two_sample(&observed, &observed).unwrap();
        prop_assert!(outcome.statistic.abs() < 1e-9);
        prop_assert!((0.0..=1.0).contains(&outcome.p_value));
    }
}

// =============================================================================
// Parsing
// =============================================================================

proptest! {
    /// Arbitrary bytes either parse into a rectangular table or fail cleanly.
    #[test]
    fn parser_never_panics(data in prop::collection::vec(any::<u8>(), 0..512)) {
        if let Ok(table) = Parser::new().parse_bytes(&data) {
            for column in table.columns() {
                prop_assert_eq!(column.len(), table.row_count());
            }
        }
    }

    #[test]
    fn parser_handles_text_grids(
        rows in prop::collection::vec(prop::collection::vec("[a-z0-9 .]{0,6}", 3), 1..20)
    ) {
        let mut data = String::from("a,b,c\n");
        for row in &rows {
            data.push_str(&row.join(","));
            data.push('\n');
        }
        let table = Parser::new().parse_bytes(data.as_bytes()).unwrap();
        prop_assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn split_statements_never_yields_blank(script in "[a-z ;'\"\\-/*\n]{0,80}") {
        for statement in split_statements(&script) {
            prop_assert!(!statement.trim().is_empty());
        }
    }
}
