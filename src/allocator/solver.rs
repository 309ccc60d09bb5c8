//! Two-criterion pack optimizer
//!
//! Dense dynamic programming over every reachable item total in
//! `[0, items + max_size]`, minimizing pack count at each exactly-reachable
//! total. The answer is the smallest reachable total >= the order, which
//! minimizes total items first and pack count second. Reconstruction walks
//! parent pointers (the size used for the final step at each total), so
//! memory stays at two words per table cell regardless of catalog size.
//!
//! Totals are scanned size-descending with strict improvement only, so the
//! witness recorded at each cell uses the largest size that achieves the
//! minimum pack count. Any deterministic rule is acceptable; this one tends
//! to produce the fewest distinct lines.

use std::collections::BTreeMap;

use super::solution::Allocation;

/// Upper bound on the DP search ceiling `items + max_size`.
///
/// Orders above this bound are not solved; callers reject them up front
/// (see `solvable`) rather than letting the table grow unbounded. At this
/// ceiling the table holds two `u32` lanes of ten million cells each.
pub const MAX_TARGET: u64 = 10_000_000;

/// Sentinel pack count for totals no combination reaches.
const UNREACHABLE: u32 = u32::MAX;

/// Whether `allocate` will solve this input rather than return empty.
///
/// Single-size catalogs are always solvable in closed form. Larger
/// catalogs require the search ceiling `items + max_size` to fit under
/// [`MAX_TARGET`].
pub fn solvable(pack_sizes: &[u32], items: u32) -> bool {
    let distinct = distinct_sizes_descending(pack_sizes);
    match distinct.as_slice() {
        [] => true,
        [_] => true,
        [max, ..] => items as u64 + *max as u64 <= MAX_TARGET,
    }
}

/// Compute the optimal allocation for `items` against `pack_sizes`.
///
/// Returns the multiset of whole packs covering the order with the
/// lexicographically minimal (total items, total packs). The empty
/// allocation is returned for inputs the solver does not handle: an empty
/// catalog, a zero order, or a multi-size order over the [`MAX_TARGET`]
/// ceiling.
pub fn allocate(pack_sizes: &[u32], items: u32) -> Allocation {
    if pack_sizes.is_empty() || items == 0 {
        return Allocation::empty();
    }

    let sizes = distinct_sizes_descending(pack_sizes);
    let Some(&max_size) = sizes.first() else {
        return Allocation::empty();
    };

    // A one-size catalog has the closed-form answer ceil(items / size),
    // valid for any magnitude the dense table could never hold.
    if let [size] = sizes.as_slice() {
        let quantity = (items as u64).div_ceil(*size as u64) as u32;
        return Allocation::from_lines([(*size, quantity)]);
    }

    let ceiling = items as u64 + max_size as u64;
    if ceiling > MAX_TARGET {
        return Allocation::empty();
    }
    let limit = ceiling as usize;

    // packs[t]: minimum pack count summing to exactly t.
    // via[t]: the size used for the final pack of that minimum.
    let mut packs = vec![UNREACHABLE; limit + 1];
    let mut via = vec![0u32; limit + 1];
    packs[0] = 0;

    for t in 1..=limit {
        let mut best = UNREACHABLE;
        let mut best_via = 0u32;
        for &size in &sizes {
            let s = size as usize;
            if s > t {
                continue;
            }
            let prev = packs[t - s];
            if prev != UNREACHABLE && prev + 1 < best {
                best = prev + 1;
                best_via = size;
            }
        }
        if best != UNREACHABLE {
            packs[t] = best;
            via[t] = best_via;
        }
    }

    // Smallest reachable total covering the order. The pack minimum at that
    // total comes with the cell.
    let mut chosen = None;
    for t in items as usize..=limit {
        if packs[t] != UNREACHABLE {
            chosen = Some(t);
            break;
        }
    }

    // ceil(items / min_size) packs of the smallest size always lands in
    // [items, items + max_size], so a non-empty catalog always reaches here.
    let Some(found) = chosen else {
        return Allocation::empty();
    };

    let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
    let mut t = found;
    while t > 0 {
        let size = via[t];
        *counts.entry(size).or_insert(0) += 1;
        t -= size as usize;
    }

    Allocation::from_lines(counts)
}

/// Distinct positive sizes, largest first.
fn distinct_sizes_descending(pack_sizes: &[u32]) -> Vec<u32> {
    let mut sizes: Vec<u32> = pack_sizes.iter().copied().filter(|&s| s > 0).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes.dedup();
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD: [u32; 5] = [250, 500, 1000, 2000, 5000];

    fn lines(allocation: &Allocation) -> Vec<(u32, u32)> {
        allocation
            .packs()
            .iter()
            .map(|p| (p.size, p.quantity))
            .collect()
    }

    // ==================== Invalid Input Tests ====================

    #[test]
    fn test_empty_catalog_returns_empty() {
        assert!(allocate(&[], 100).is_empty());
    }

    #[test]
    fn test_zero_items_returns_empty() {
        assert!(allocate(&STANDARD, 0).is_empty());
    }

    #[test]
    fn test_zero_sizes_filtered_out() {
        let allocation = allocate(&[0, 250], 100);
        assert_eq!(lines(&allocation), vec![(250, 1)]);
    }

    // ==================== Edge Case Policy Tests ====================

    #[test]
    fn test_single_size_exact_multiple() {
        let allocation = allocate(&[250], 250);
        assert_eq!(lines(&allocation), vec![(250, 1)]);
    }

    #[test]
    fn test_single_size_rounds_up() {
        let allocation = allocate(&[250], 251);
        assert_eq!(lines(&allocation), vec![(250, 2)]);
    }

    #[test]
    fn test_single_huge_size_closed_form() {
        // One-size catalogs bypass the dense table entirely
        let allocation = allocate(&[2_147_483_647], 2_147_483_647);
        assert_eq!(lines(&allocation), vec![(2_147_483_647, 1)]);
    }

    #[test]
    fn test_order_below_smallest_size() {
        let allocation = allocate(&STANDARD, 1);
        assert_eq!(lines(&allocation), vec![(250, 1)]);
    }

    #[test]
    fn test_order_equal_to_a_size() {
        // An exact size wins outright: total items == order dominates
        let allocation = allocate(&STANDARD, 5000);
        assert_eq!(lines(&allocation), vec![(5000, 1)]);
    }

    // ==================== Objective Tests ====================

    #[test]
    fn test_items_dominate_pack_count() {
        // 251 from {250, 500}: one 500 beats two 250s on total items
        let allocation = allocate(&[250, 500], 251);
        assert_eq!(lines(&allocation), vec![(500, 1)]);
        assert_eq!(allocation.total_items(), 500);
    }

    #[test]
    fn test_fewer_packs_break_item_ties() {
        // 750 from {250, 500}: both {500,250} and {250x3} ship 750;
        // the two-pack split wins
        let allocation = allocate(&[250, 500], 750);
        assert_eq!(allocation.total_items(), 750);
        assert_eq!(allocation.total_packs(), 2);
    }

    #[test]
    fn test_combination_beats_rounding_up() {
        let allocation = allocate(&STANDARD, 501);
        assert_eq!(lines(&allocation), vec![(500, 1), (250, 1)]);
    }

    #[test]
    fn test_large_order_standard_catalog() {
        let allocation = allocate(&STANDARD, 12001);
        assert_eq!(lines(&allocation), vec![(5000, 2), (2000, 1), (250, 1)]);
        assert_eq!(allocation.total_items(), 12_250);
    }

    #[test]
    fn test_coprime_catalog_exact_cover() {
        // 500_000 is exactly reachable from {23, 31, 53}; the optimizer
        // must find the exact cover and the minimal pack split of it
        let allocation = allocate(&[23, 31, 53], 500_000);
        assert_eq!(allocation.total_items(), 500_000);
        assert_eq!(lines(&allocation), vec![(53, 9429), (31, 7), (23, 2)]);
    }

    #[test]
    fn test_duplicate_sizes_tolerated() {
        let allocation = allocate(&[250, 250, 500], 750);
        assert_eq!(allocation.total_items(), 750);
        assert_eq!(allocation.total_packs(), 2);
    }

    #[test]
    fn test_input_order_irrelevant() {
        let a = allocate(&[5000, 250, 1000, 500, 2000], 12001);
        let b = allocate(&STANDARD, 12001);
        assert_eq!(a, b);
    }

    #[test]
    fn test_deterministic() {
        let a = allocate(&[23, 31, 53], 100_000);
        let b = allocate(&[23, 31, 53], 100_000);
        assert_eq!(a, b);
    }

    // ==================== Ceiling Tests ====================

    #[test]
    fn test_multi_size_over_ceiling_returns_empty() {
        let items = (MAX_TARGET - 100) as u32;
        assert!(allocate(&[250, 500], items).is_empty());
    }

    #[test]
    fn test_solvable_single_size_any_magnitude() {
        assert!(solvable(&[2_147_483_647], 2_147_483_647));
    }

    #[test]
    fn test_solvable_respects_ceiling() {
        assert!(solvable(&[250, 500], 500_000));
        assert!(!solvable(&[250, 500], (MAX_TARGET - 100) as u32));
    }

    #[test]
    fn test_solvable_empty_catalog() {
        assert!(solvable(&[], 100));
    }

    // ==================== Invariant Spot Checks ====================

    #[test]
    fn test_cover_invariant_near_boundaries() {
        for items in [1u32, 249, 250, 251, 499, 500, 501, 12_001] {
            let allocation = allocate(&STANDARD, items);
            assert!(
                allocation.total_items() >= items as u64,
                "order {} under-covered: {}",
                items,
                allocation.total_items()
            );
        }
    }

    #[test]
    fn test_membership_invariant() {
        let allocation = allocate(&[23, 31, 53], 1234);
        for pack in allocation.packs() {
            assert!([23, 31, 53].contains(&pack.size));
        }
    }

    #[test]
    fn test_monotonic_totals() {
        let mut last = 0;
        for items in 1..=600 {
            let total = allocate(&STANDARD, items).total_items();
            assert!(total >= last, "total shrank at order {}", items);
            last = total;
        }
    }
}
