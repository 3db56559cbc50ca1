//! Reorder arithmetic for orderable lists.
//!
//! A move swaps two neighbours and renumbers every item to its position, so display orders
//! are always `0..len` with no gaps. Rollback is not computed here: a failed save reloads the
//! authoritative order from the server.

use crate::framework::{display_cmp, Resource, ResourceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Swaps `index` with its neighbour in `direction` and renumbers the slice.
///
/// Returns `false`, leaving the slice untouched, when either position is out of bounds.
pub fn move_item<T: Resource>(items: &mut [T], index: usize, direction: Direction) -> bool {
    if index >= items.len() {
        return false;
    }
    let target = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => index.checked_add(1).filter(|t| *t < items.len()),
    };
    let Some(target) = target else {
        return false;
    };
    items.swap(index, target);
    renumber(items);
    true
}

pub fn renumber<T: Resource>(items: &mut [T]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.set_display_order(position as i32);
    }
}

pub fn ordered_ids<T: Resource>(items: &[T]) -> Vec<ResourceId> {
    items.iter().map(Resource::id).collect()
}

/// Sorts orderable resources for display; other resources keep server order.
pub fn sort_for_display<T: Resource>(items: &mut [T]) {
    if T::ORDERABLE {
        items.sort_by(display_cmp);
    }
}
