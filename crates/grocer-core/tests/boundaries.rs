//! Extreme prices and ids, and restores over a session that kept going.

use grocer_core::{
    CartLine, CoreError, GroceryStore, Item, ItemId, Money, Snapshot, ValidationError,
    MAX_CUSTOM_ID, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE_CENTS,
};

fn counts(store: &GroceryStore) -> Vec<(ItemId, String, u64)> {
    store
        .catalog()
        .items()
        .into_iter()
        .map(|item| (item.id, item.name.clone(), item.purchase_count))
        .collect()
}

#[test]
fn oversized_price_is_rejected_before_the_cart() {
    let mut store = GroceryStore::default();

    let err = store
        .cart_add("Gold Bar", Some(Money::from_cents(i64::MAX / 2)), 5, None)
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "price"
    ));
    assert_eq!(store.cart_list().size, 0);
    assert_eq!(store.undo_size(), 0);
}

#[test]
fn priciest_lines_keep_exact_totals() {
    let mut store = GroceryStore::default();
    let price = Money::from_cents(MAX_UNIT_PRICE_CENTS);
    let quantity = i64::from(MAX_ITEM_QUANTITY);
    for name in ["Gold Bar", "Silver Bar", "Platinum Bar"] {
        store.cart_add(name, Some(price), quantity, None).unwrap();
    }

    let view = store.cart_list();
    assert_eq!(view.total_price.cents(), 299_700_000_000);

    store.checkout_start().unwrap();
    let receipt = store.checkout_process();

    assert_eq!(receipt.subtotal.cents(), 299_700_000_000);
    assert_eq!(receipt.tax.cents(), 23_976_000_000);
    assert_eq!(receipt.discount.cents(), 14_985_000_000);
    assert_eq!(receipt.grand_total.cents(), 308_691_000_000);
}

#[test]
fn snapshot_line_with_oversized_price_is_skipped() {
    let mut snapshot = GroceryStore::default().snapshot();
    snapshot.cart.push(CartLine::new(
        "Gold Bar",
        Some(Money::from_cents(i64::MAX / 2)),
        5,
        None,
    ));
    snapshot
        .cart
        .push(CartLine::new("Milk (1 Liter)", None, 1, Some(0)));

    let mut store = GroceryStore::default();
    let summary = store.restore(&Snapshot::from_json(&snapshot.to_json().unwrap()).unwrap());

    assert_eq!(summary.lines_skipped, 1);
    assert_eq!(summary.lines_restored, 1);
    let view = store.cart_list();
    assert_eq!(view.size, 1);
    assert!(!view.total_price.is_negative());
}

#[test]
fn snapshot_item_past_id_ceiling_is_skipped() {
    let mut snapshot = GroceryStore::default().snapshot();
    let mut jam = Item::custom(ItemId::MAX, "Jam", Some(Money::from_major(99)));
    jam.purchase_count = 4;
    snapshot.items.push(jam);

    let mut store = GroceryStore::default();
    let summary = store.restore(&snapshot);

    assert_eq!(summary.items_skipped, 1);
    assert!(store.get_item(ItemId::MAX).is_err());
    assert_eq!(store.catalog().next_custom_id(), 1000);

    // New custom purchases still get an id and are counted
    store
        .cart_add("Tea", Some(Money::from_major(45)), 2, None)
        .unwrap();
    store.checkout_start().unwrap();
    let receipt = store.checkout_process();

    assert_eq!(receipt.lines[0].counted_as, Some(1000));
    assert_eq!(store.get_item(1000).unwrap().purchase_count, 2);
}

#[test]
fn custom_purchases_after_last_id_are_not_counted() {
    let mut snapshot = GroceryStore::default().snapshot();
    snapshot
        .items
        .push(Item::custom(MAX_CUSTOM_ID, "Jam", Some(Money::from_major(99))));

    let mut store = GroceryStore::default();
    store.restore(&snapshot);
    store
        .cart_add("Tea", Some(Money::from_major(45)), 2, None)
        .unwrap();
    store.checkout_start().unwrap();
    let receipt = store.checkout_process();

    assert_eq!(receipt.lines[0].counted_as, None);
    assert_eq!(receipt.subtotal, Money::from_major(90));
    assert!(store.catalog().find_by_name("Tea").is_none());
}

#[test]
fn restore_after_more_shopping_matches_saved_state() {
    let mut store = GroceryStore::default();
    store
        .cart_add("Jam", Some(Money::from_major(99)), 1, None)
        .unwrap();
    store.checkout_start().unwrap();
    store.checkout_process();
    store.cart_add("Bread (Whole Wheat)", None, 1, Some(1)).unwrap();
    let saved_counts = counts(&store);
    let saved_cart = store.cart_list();
    let text = store.snapshot().to_json().unwrap();

    // Keep shopping after the save
    store
        .cart_add("Tea", Some(Money::from_major(45)), 4, None)
        .unwrap();
    store.cart_add("Milk (1 Liter)", None, 3, Some(0)).unwrap();
    store.checkout_start().unwrap();
    store.checkout_process();
    assert_ne!(counts(&store), saved_counts);

    store.restore(&Snapshot::from_json(&text).unwrap());

    assert_eq!(counts(&store), saved_counts);
    assert_eq!(store.catalog().len(), 11);
    assert_eq!(store.cart_list(), saved_cart);
    assert_eq!(store.undo_size(), 0);

    // Ids continue from the saved catalog
    store
        .cart_add("Tea", Some(Money::from_major(45)), 1, None)
        .unwrap();
    store.checkout_start().unwrap();
    let receipt = store.checkout_process();
    let tea = receipt.lines.iter().find(|line| line.name == "Tea").unwrap();
    assert_eq!(tea.counted_as, Some(1001));
}
