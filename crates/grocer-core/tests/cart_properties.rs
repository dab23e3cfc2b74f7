//! Property-based tests for cart, undo and ranking invariants.
//!
//! - add followed by undo restores the exact previous cart
//! - remove_at(p) followed by undo puts the line back at p
//! - cart total always equals the sum of line totals
//! - ranking never depends on the order purchases were recorded in
//! - receipt order equals pre-checkout cart order

use proptest::prelude::*;

use grocer_core::ranking::rank_order;
use grocer_core::{Catalog, GroceryStore, Money, MAX_CART_LINES};

// ═══════════════════════════════════════════════════════════════════════════
// GENERATORS
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum CartOp {
    Add {
        name: String,
        price: Option<i64>,
        quantity: i64,
        product_id: Option<u32>,
    },
    Remove(usize),
    Undo,
}

fn line_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,10}"
}

fn add_op() -> impl Strategy<Value = CartOp> {
    (
        line_name(),
        proptest::option::of(0i64..100_000),
        1i64..=999,
        proptest::option::of(0u32..10),
    )
        .prop_map(|(name, price, quantity, product_id)| CartOp::Add {
            name,
            price,
            quantity,
            product_id,
        })
}

fn cart_op() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        4 => add_op(),
        2 => (0usize..12).prop_map(CartOp::Remove),
        1 => Just(CartOp::Undo),
    ]
}

fn apply(store: &mut GroceryStore, op: &CartOp) {
    match op {
        CartOp::Add {
            name,
            price,
            quantity,
            product_id,
        } => {
            let _ = store.cart_add(name, price.map(Money::from_cents), *quantity, *product_id);
        }
        CartOp::Remove(position) => {
            let _ = store.cart_remove(*position);
        }
        CartOp::Undo => {
            store.undo();
        }
    }
}

fn store_after(ops: &[CartOp]) -> GroceryStore {
    let mut store = GroceryStore::default();
    for op in ops {
        apply(&mut store, op);
    }
    store
}

// ═══════════════════════════════════════════════════════════════════════════
// PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn add_then_undo_restores_cart(
        ops in proptest::collection::vec(cart_op(), 0..40),
        extra in add_op(),
    ) {
        let mut store = store_after(&ops);
        prop_assume!(store.cart().size() < MAX_CART_LINES);
        let before = store.cart_list();
        let depth = store.undo_size();

        apply(&mut store, &extra);
        prop_assert_eq!(store.undo_size(), depth + 1);
        store.undo();

        prop_assert_eq!(store.cart_list(), before);
        prop_assert_eq!(store.undo_size(), depth);
    }

    #[test]
    fn remove_then_undo_reinserts_at_position(
        ops in proptest::collection::vec(add_op(), 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut store = store_after(&ops);
        let before = store.cart_list();
        let position = pick.index(store.cart().size());

        let removed = store.cart_remove(position).unwrap();
        store.undo();

        prop_assert_eq!(store.cart().get(position), Some(&removed));
        prop_assert_eq!(store.cart_list(), before);
    }

    #[test]
    fn total_matches_line_sum(ops in proptest::collection::vec(cart_op(), 0..60)) {
        let store = store_after(&ops);
        let view = store.cart_list();

        let expected: Money = view.lines.iter().map(|l| l.line_total()).sum();
        let quantity: u64 = view.lines.iter().map(|l| u64::from(l.quantity)).sum();

        prop_assert_eq!(view.total_price, expected);
        prop_assert_eq!(view.total_quantity, quantity);
        prop_assert_eq!(view.size, view.lines.len());
    }

    #[test]
    fn ranking_ignores_recording_order(
        purchases in proptest::collection::vec((0u32..10, 1u32..5), 0..50),
    ) {
        let mut forward = Catalog::default();
        let mut backward = Catalog::default();
        for (id, qty) in &purchases {
            forward.record_purchase(*id, *qty);
        }
        for (id, qty) in purchases.iter().rev() {
            backward.record_purchase(*id, *qty);
        }

        let top = forward.get_top_n(10);
        prop_assert_eq!(&top, &backward.get_top_n(10));
        for pair in top.windows(2) {
            prop_assert!(rank_order(&pair[0], &pair[1]).is_lt());
        }
    }

    #[test]
    fn receipt_follows_cart_order(ops in proptest::collection::vec(add_op(), 1..30)) {
        let mut store = store_after(&ops);
        let cart: Vec<String> = store.cart().lines().map(|l| l.name.clone()).collect();

        store.checkout_start().unwrap();
        let receipt = store.checkout_process();
        let billed: Vec<String> = receipt.lines.into_iter().map(|l| l.name).collect();

        prop_assert_eq!(billed, cart);
        prop_assert!(store.cart().is_empty());
        prop_assert_eq!(store.queue_size(), 0);
    }
}
