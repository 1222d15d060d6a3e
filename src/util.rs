//! # Utilities
//!
//! Small helpers shared across the generator.

/// Produces every non-empty ordered sub-sequence of `items`, sorted by
/// ascending length. Relative order within each result follows the input;
/// for `n` items this yields `2^n - 1` entries.
pub fn combinations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut results: Vec<Vec<T>> = vec![Vec::new()];
    for value in items {
        let snapshot = results.clone();
        for prefix in snapshot {
            let mut extended = prefix;
            extended.push(value.clone());
            results.push(extended);
        }
    }
    results.retain(|combination| !combination.is_empty());
    // Stable sort keeps the generation order within each length bucket.
    results.sort_by_key(Vec::len);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_combinations_of_three() {
        let result = combinations(&["a", "b", "c"]);
        assert_eq!(
            result,
            vec![
                vec!["a"],
                vec!["b"],
                vec!["c"],
                vec!["a", "b"],
                vec!["a", "c"],
                vec!["b", "c"],
                vec!["a", "b", "c"],
            ]
        );
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 3)]
    #[case(4, 15)]
    #[case(5, 31)]
    fn test_combination_count(#[case] n: usize, #[case] expected: usize) {
        let items: Vec<usize> = (0..n).collect();
        assert_eq!(combinations(&items).len(), expected);
    }

    #[test]
    fn test_combinations_preserve_relative_order() {
        for combination in combinations(&[1, 2, 3, 4]) {
            let mut sorted = combination.clone();
            sorted.sort_unstable();
            assert_eq!(combination, sorted);
        }
    }
}
