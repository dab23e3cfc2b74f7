//! # Frequency Ranking
//!
//! Derives the "most purchased" view over the catalog.
//!
//! ## Ordering
//! ```text
//! purchase_count DESC, then id ASC
//!
//!   id  count         rank
//!   ──  ─────         ────
//!    3    5    ──►     1   (highest count)
//!    0    2    ──►     2   (tie on 2: lower id first)
//!    7    2    ──►     3
//! 1000    1    ──►     4   (custom items compete with defaults)
//! ```
//!
//! Ids are unique, so the order is total and the result never depends on
//! the catalog's internal iteration order.

use std::cmp::Ordering;

use crate::types::Item;

/// Rank comparator: higher `purchase_count` first, ties by ascending id.
pub fn rank_order(a: &Item, b: &Item) -> Ordering {
    b.purchase_count
        .cmp(&a.purchase_count)
        .then_with(|| a.id.cmp(&b.id))
}

/// Returns clones of the `n` highest-ranked items. Read-only.
pub fn top_n<'a, I>(items: I, n: usize) -> Vec<Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut ranked: Vec<&Item> = items.into_iter().collect();
    ranked.sort_unstable_by(|a, b| rank_order(a, b));
    ranked.into_iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, count: u64) -> Item {
        let mut item = Item::seeded(id, &format!("Item {}", id), None, "");
        item.purchase_count = count;
        item
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        let items = vec![item(7, 2), item(3, 5), item(1000, 1), item(0, 2)];
        let ids: Vec<u32> = top_n(&items, 10).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 0, 7, 1000]);
    }

    #[test]
    fn test_truncates_to_n() {
        let items = vec![item(0, 1), item(1, 2), item(2, 3)];
        let top = top_n(&items, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, 2);
    }
}
