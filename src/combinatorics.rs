//! Counting helpers: factorials, permutations and combinations.
//!
//! All functions use checked `u64` arithmetic. `None` marks both an
//! invalid request (choosing more items than exist) and a result that
//! does not fit in `u64`.

/// n! = 1·2·…·n, with 0! = 1.
///
/// # Returns
/// - `None` if the result overflows `u64` (n > 20).
///
/// # Examples
/// ```
/// use u_statkit::combinatorics::factorial;
/// assert_eq!(factorial(0), Some(1));
/// assert_eq!(factorial(5), Some(120));
/// assert_eq!(factorial(21), None);
/// ```
pub fn factorial(n: u64) -> Option<u64> {
    (1..=n).try_fold(1_u64, |acc, k| acc.checked_mul(k))
}

/// Ordered selections: total! / (total − chosen)!.
///
/// # Returns
/// - `None` if `chosen > total` or the result overflows.
///
/// # Examples
/// ```
/// use u_statkit::combinatorics::permutations;
/// assert_eq!(permutations(5, 2), Some(20));
/// assert_eq!(permutations(2, 5), None);
/// ```
pub fn permutations(total: u64, chosen: u64) -> Option<u64> {
    if chosen > total {
        return None;
    }
    (0..chosen).try_fold(1_u64, |acc, i| acc.checked_mul(total - i))
}

/// Unordered selections: total! / (chosen! · (total − chosen)!).
///
/// # Algorithm
/// Multiplicative formula over `k = min(chosen, total − chosen)` terms.
/// Each partial product `C(total − k + i, i)` is an integer, so the
/// running division is exact; `u128` intermediates hold the product
/// before division.
///
/// # Returns
/// - `None` if `chosen > total` or the result overflows `u64`.
///
/// # Examples
/// ```
/// use u_statkit::combinatorics::choose;
/// assert_eq!(choose(5, 2), Some(10));
/// assert_eq!(choose(52, 5), Some(2_598_960));
/// assert_eq!(choose(3, 4), None);
/// ```
pub fn choose(total: u64, chosen: u64) -> Option<u64> {
    if chosen > total {
        return None;
    }
    let k = chosen.min(total - chosen);
    let mut acc: u128 = 1;
    for i in 1..=k {
        acc = acc.checked_mul(u128::from(total - k + i))? / u128::from(i);
        if acc > u128::from(u64::MAX) {
            return None;
        }
    }
    u64::try_from(acc).ok()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(1), Some(1));
        assert_eq!(factorial(10), Some(3_628_800));
        assert_eq!(factorial(20), Some(2_432_902_008_176_640_000));
    }

    #[test]
    fn test_permutations() {
        assert_eq!(permutations(5, 0), Some(1));
        assert_eq!(permutations(5, 5), Some(120));
        assert_eq!(permutations(10, 3), Some(720));
        assert_eq!(permutations(0, 0), Some(1));
        assert_eq!(permutations(3, 4), None);
    }

    #[test]
    fn test_permutations_at_u64_limit() {
        assert_eq!(permutations(u64::MAX, 0), Some(1));
        assert_eq!(permutations(u64::MAX, 1), Some(u64::MAX));
        assert_eq!(permutations(u64::MAX, 2), None);
        assert_eq!(choose(u64::MAX, 0), Some(1));
        assert_eq!(choose(u64::MAX, 1), Some(u64::MAX));
    }

    #[test]
    fn test_choose() {
        assert_eq!(choose(0, 0), Some(1));
        assert_eq!(choose(10, 0), Some(1));
        assert_eq!(choose(10, 10), Some(1));
        assert_eq!(choose(10, 3), Some(120));
        assert_eq!(choose(60, 30), Some(118_264_581_564_861_424));
        assert_eq!(choose(100, 50), None);
    }

    #[test]
    fn test_choose_beyond_factorial_range() {
        // 30! overflows u64, the combination does not.
        assert_eq!(factorial(30), None);
        assert_eq!(choose(30, 2), Some(435));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn choose_is_symmetric(total in 0_u64..60, chosen in 0_u64..60) {
            prop_assume!(chosen <= total);
            prop_assert_eq!(choose(total, chosen), choose(total, total - chosen));
        }

        #[test]
        fn pascal_rule(total in 1_u64..60, chosen in 1_u64..60) {
            prop_assume!(chosen < total);
            let lhs = choose(total, chosen).unwrap();
            let rhs = choose(total - 1, chosen - 1).unwrap() + choose(total - 1, chosen).unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn choose_matches_factorials(total in 0_u64..=20, chosen in 0_u64..=20) {
            prop_assume!(chosen <= total);
            let expected = factorial(total).unwrap()
                / (factorial(chosen).unwrap() * factorial(total - chosen).unwrap());
            prop_assert_eq!(choose(total, chosen), Some(expected));
        }
    }
}
