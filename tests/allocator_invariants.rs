//! Allocator invariant tests
//!
//! Verifies the optimizer's contract: coverage, catalog membership,
//! two-criterion optimality (checked against an independent brute-force
//! oracle on small inputs), determinism on invalid inputs, and
//! monotonicity of shipped totals.

use packcalc::allocator::{allocate, Allocation};

/// Independent oracle: enumerate every pack combination up to the search
/// ceiling and return the lexicographically minimal (total items, packs).
/// Only usable for small catalogs and orders.
fn brute_force_optimum(sizes: &[u32], items: u32) -> (u64, u64) {
    let max_size = *sizes.iter().max().expect("non-empty catalog") as u64;
    let ceiling = items as u64 + max_size;

    let mut best: Option<(u64, u64)> = None;
    let mut stack: Vec<(usize, u64, u64)> = vec![(0, 0, 0)];

    while let Some((index, total, packs)) = stack.pop() {
        if total >= items as u64 {
            let candidate = (total, packs);
            if best.map_or(true, |b| candidate < b) {
                best = Some(candidate);
            }
            continue;
        }
        if index == sizes.len() || total > ceiling {
            continue;
        }

        let size = sizes[index] as u64;
        let max_quantity = (ceiling - total) / size + 1;
        for quantity in 0..=max_quantity {
            let next_total = total + size * quantity;
            if next_total > ceiling + size {
                break;
            }
            stack.push((index + 1, next_total, packs + quantity));
        }
    }

    best.expect("a covering combination always exists")
}

fn assert_valid(allocation: &Allocation, sizes: &[u32], items: u32) {
    // Cover
    assert!(
        allocation.total_items() >= items as u64,
        "catalog {:?}, order {}: shipped {} under-covers",
        sizes,
        items,
        allocation.total_items()
    );
    // Membership and positive quantities
    for pack in allocation.packs() {
        assert!(
            sizes.contains(&pack.size),
            "catalog {:?}: size {} not in catalog",
            sizes,
            pack.size
        );
        assert!(pack.quantity > 0);
    }
}

// ==================== Optimality Against the Oracle ====================

#[test]
fn allocation_matches_brute_force_on_small_inputs() {
    let catalogs: &[&[u32]] = &[
        &[250, 500],
        &[3, 5, 9],
        &[5, 7],
        &[23, 31, 53],
        &[2, 3],
        &[10],
    ];

    for &sizes in catalogs {
        for items in 1..=120u32 {
            let allocation = allocate(sizes, items);
            assert_valid(&allocation, sizes, items);

            let (expected_items, expected_packs) = brute_force_optimum(sizes, items);
            assert_eq!(
                (allocation.total_items(), allocation.total_packs()),
                (expected_items, expected_packs),
                "catalog {:?}, order {}",
                sizes,
                items
            );
        }
    }
}

// ==================== Concrete Scenarios ====================

#[test]
fn scenario_one_item_ships_smallest_pack() {
    let allocation = allocate(&[250, 500, 1000, 2000, 5000], 1);
    assert_eq!(allocation.quantity_of(250), 1);
    assert_eq!(allocation.total_packs(), 1);
}

#[test]
fn scenario_exact_smallest_pack() {
    let allocation = allocate(&[250, 500, 1000, 2000, 5000], 250);
    assert_eq!(allocation.quantity_of(250), 1);
    assert_eq!(allocation.total_packs(), 1);
}

#[test]
fn scenario_one_over_smallest_pack() {
    let allocation = allocate(&[250, 500, 1000, 2000, 5000], 251);
    assert_eq!(allocation.quantity_of(500), 1);
    assert_eq!(allocation.total_packs(), 1);
}

#[test]
fn scenario_one_over_middle_pack() {
    let allocation = allocate(&[250, 500, 1000, 2000, 5000], 501);
    assert_eq!(allocation.quantity_of(500), 1);
    assert_eq!(allocation.quantity_of(250), 1);
    assert_eq!(allocation.total_packs(), 2);
}

#[test]
fn scenario_large_order() {
    let allocation = allocate(&[250, 500, 1000, 2000, 5000], 12001);
    assert_eq!(allocation.quantity_of(5000), 2);
    assert_eq!(allocation.quantity_of(2000), 1);
    assert_eq!(allocation.quantity_of(250), 1);
    assert_eq!(allocation.total_items(), 12_250);
}

#[test]
fn scenario_coprime_catalog_half_million() {
    let allocation = allocate(&[23, 31, 53], 500_000);

    assert_eq!(allocation.quantity_of(23), 2);
    assert_eq!(allocation.quantity_of(31), 7);
    assert_eq!(allocation.quantity_of(53), 9429);

    // The cover is exact: 2*23 + 7*31 + 9429*53 = 500000
    assert_eq!(allocation.total_items(), 500_000);
    assert_eq!(allocation.total_packs(), 2 + 7 + 9429);
}

// ==================== Empty Input Determinism ====================

#[test]
fn empty_catalog_yields_empty_allocation() {
    assert!(allocate(&[], 1).is_empty());
    assert!(allocate(&[], 500_000).is_empty());
}

#[test]
fn zero_items_yields_empty_allocation() {
    assert!(allocate(&[250, 500], 0).is_empty());
}

// ==================== Monotonicity ====================

#[test]
fn shipped_totals_never_shrink_as_orders_grow() {
    let catalogs: &[&[u32]] = &[&[250, 500, 1000, 2000, 5000], &[23, 31, 53]];

    for &sizes in catalogs {
        let mut previous = 0u64;
        for items in 1..=2000u32 {
            let total = allocate(sizes, items).total_items();
            assert!(
                total >= previous,
                "catalog {:?}: total shrank from {} to {} at order {}",
                sizes,
                previous,
                total,
                items
            );
            previous = total;
        }
    }
}
