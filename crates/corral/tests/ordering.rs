//! Comparison-protocol integration tests: lexicographic laws, derived
//! predicates, binary search with insertion points, and stable sorting.

mod common;

use std::cmp::Ordering;

use common::int_vector;
use corral::{
    binary_search, lower_bound, upper_bound, CollectionError, Comparable, Comparator, LinkedList,
    Map, Set, Vector,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ============================================================================
// Lexicographic comparison laws
// ============================================================================

#[rstest]
#[case(&[], &[], Ordering::Equal)]
#[case(&[1], &[1, 2], Ordering::Less)]
#[case(&[1, 2], &[1], Ordering::Greater)]
#[case(&[1, 2, 3], &[1, 2, 3], Ordering::Equal)]
#[case(&[1, 2, 4], &[1, 3, 0], Ordering::Less)]
#[case(&[2], &[1, 9, 9], Ordering::Greater)]
fn test_vector_comparison_laws(
    #[case] left: &[i64],
    #[case] right: &[i64],
    #[case] expected: Ordering,
) {
    let a = int_vector(left);
    let b = int_vector(right);
    assert_eq!(a.compare(&b), Ok(expected));
    // the same law holds for the list backing
    let la: LinkedList<i64> = left.iter().copied().collect();
    let lb: LinkedList<i64> = right.iter().copied().collect();
    assert_eq!(la.compare(&lb), Ok(expected));
}

#[rstest]
#[case(&[], &[1])]
#[case(&[1], &[2])]
#[case(&[1, 2], &[1, 3])]
#[case(&[5, 5], &[5, 5, 5])]
fn test_derived_predicates_are_antisymmetric(#[case] left: &[i64], #[case] right: &[i64]) {
    let a = int_vector(left);
    let b = int_vector(right);
    assert_eq!(a.is_less_than(&b), b.is_greater_than(&a));
    assert_eq!(a.is_less_or_equal(&b), b.is_greater_or_equal(&a));
    assert_eq!(a.is_equal_to(&b), b.is_equal_to(&a));
    assert_eq!(a.is_not_equal_to(&b), Ok(true));
}

#[test]
fn test_equal_collections_satisfy_every_equal_predicate() {
    let a = int_vector(&[1, 2, 3]);
    let b = int_vector(&[1, 2, 3]);
    assert_eq!(a.is_equal_to(&b), Ok(true));
    assert_eq!(a.is_less_or_equal(&b), Ok(true));
    assert_eq!(a.is_greater_or_equal(&b), Ok(true));
    assert_eq!(a.is_less_than(&b), Ok(false));
    assert_eq!(a.is_greater_than(&b), Ok(false));
}

// ============================================================================
// Incompatible operands
// ============================================================================

#[test]
fn test_compare_across_comparators_is_rejected() {
    let descending = Comparator::<i64>::new("descending", |a, b| b.cmp(a));
    let natural: Set<i64> = [1, 2].into_iter().collect();
    let custom: Set<i64> = Set::with_comparator(descending);
    assert!(matches!(
        natural.compare(&custom),
        Err(CollectionError::NotComparable { .. })
    ));
    let mapped: Map<i64, i64> = Map::new();
    let custom_map: Map<i64, i64> = Map::with_comparator(descending);
    assert!(matches!(
        mapped.compare(&custom_map),
        Err(CollectionError::NotComparable { .. })
    ));
}

// ============================================================================
// Binary search contract
// ============================================================================

const SORTED: [i64; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

#[rstest]
#[case(65, None, 6)]
#[case(100, Some(9), 9)]
#[case(10, Some(0), 0)]
#[case(5, None, 0)]
#[case(105, None, 10)]
#[case(50, Some(4), 4)]
fn test_binary_search_reports_found_and_insertion(
    #[case] target: i64,
    #[case] found: Option<usize>,
    #[case] insertion: usize,
) {
    let outcome = binary_search(&SORTED, &target, &Comparator::natural(), 0, None);
    assert_eq!(outcome.found, found);
    assert_eq!(outcome.insertion, insertion);
}

#[test]
fn test_bounds_bracket_runs_of_equal_keys() {
    let items = [10, 20, 20, 20, 30];
    let cmp = Comparator::natural();
    assert_eq!(lower_bound(&items, &20, &cmp, 0, None), 1);
    assert_eq!(upper_bound(&items, &20, &cmp, 0, None), 4);
    assert_eq!(lower_bound(&items, &25, &cmp, 0, None), 4);
    assert_eq!(upper_bound(&items, &25, &cmp, 0, None), 4);
}

#[test]
fn test_search_window_can_exclude_the_target() {
    let cmp = Comparator::natural();
    let outcome = binary_search(&SORTED, &100, &cmp, 0, Some(9));
    assert_eq!(outcome.found, None);
    assert_eq!(outcome.insertion, 9);
    // an inverted window is empty, not an error
    let outcome = binary_search(&SORTED, &50, &cmp, 7, Some(3));
    assert_eq!(outcome.found, None);
}

#[test]
fn test_insertion_point_feeds_sorted_insert() {
    let mut items = vec![10, 20, 40, 50];
    let outcome = binary_search(&items, &30, &Comparator::natural(), 0, None);
    assert_eq!(outcome.found, None);
    items.insert(outcome.insertion, 30);
    assert_eq!(items, vec![10, 20, 30, 40, 50]);
}

// ============================================================================
// Stable sorting
// ============================================================================

#[test]
fn test_sort_preserves_order_of_equal_keys() {
    // composite elements: equal keys must keep their arrival order
    let by_key = Comparator::<(i64, char)>::new("by-key", |a, b| a.0.cmp(&b.0));
    let mut items: Vector<(i64, char)> =
        Vector::from(vec![(2, 'a'), (1, 'x'), (2, 'b'), (1, 'y'), (2, 'c')]);
    items.sort_by(&by_key);
    assert_eq!(
        items.to_vec(),
        vec![(1, 'x'), (1, 'y'), (2, 'a'), (2, 'b'), (2, 'c')]
    );

    let mut list: LinkedList<(i64, char)> =
        vec![(2, 'a'), (1, 'x'), (2, 'b'), (1, 'y'), (2, 'c')].into();
    list.sort_by(&by_key);
    assert_eq!(
        list.to_vec(),
        vec![(1, 'x'), (1, 'y'), (2, 'a'), (2, 'b'), (2, 'c')]
    );
}

#[test]
fn test_sorted_copy_against_in_place_sort() {
    let vector = int_vector(&[4, 3, 2, 1, 5, 4]);
    let copy = vector.sorted();
    assert_eq!(copy.to_vec(), vec![1, 2, 3, 4, 4, 5]);
    assert_eq!(vector.to_vec(), vec![4, 3, 2, 1, 5, 4]);

    let mut in_place = vector.clone();
    in_place.sort();
    assert_eq!(in_place, copy);
}
