//! Column combination normalization properties

use metanome::types::{ColumnCombination, ColumnIdentifier, ColumnPermutation};
use proptest::prelude::*;

fn columns() -> impl Strategy<Value = Vec<ColumnIdentifier>> {
    prop::collection::vec(
        ("[a-c]", "[a-z]{1,3}").prop_map(|(table, column)| ColumnIdentifier::new(table, column)),
        0..8,
    )
}

proptest! {
    #[test]
    fn combination_ignores_order_and_duplicates(columns in columns(), seed in any::<u64>()) {
        let mut shuffled = columns.clone();
        shuffled.extend(columns.iter().take(2).cloned());
        // Deterministic rotation stands in for a shuffle.
        if !shuffled.is_empty() {
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
        }

        let original = ColumnCombination::new(columns.clone());
        let permuted = ColumnCombination::new(shuffled);
        prop_assert_eq!(&original, &permuted);
        prop_assert_eq!(original.to_string(), permuted.to_string());
        for column in &columns {
            prop_assert!(original.contains(column));
        }
        prop_assert!(original.columns().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn permutation_preserves_input_order(columns in columns()) {
        let permutation = ColumnPermutation::new(columns.clone());
        prop_assert_eq!(permutation.columns(), columns.as_slice());
    }
}
