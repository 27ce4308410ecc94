//! Slice helpers and tree-path parsing shared by the workspace models.

use crate::error::{DomainError, DomainResult};

/// Separator used by the "save to" path picker.
pub const PATH_SEPARATOR: char = '/';

/// Replaces the element at `index`, returning the previous value.
///
/// # Errors
///
/// Returns `IndexOutOfBounds` if `index >= items.len()`.
pub fn replace_item_at_index<T>(
    items: &mut [T],
    index: usize,
    value: T,
    what: &'static str,
) -> DomainResult<T> {
    let len = items.len();
    let slot = items
        .get_mut(index)
        .ok_or(DomainError::out_of_bounds(what, index, len))?;
    Ok(std::mem::replace(slot, value))
}

/// Removes the element at `index`.
///
/// # Errors
///
/// Returns `IndexOutOfBounds` if `index >= items.len()`.
pub fn remove_item_at_index<T>(
    items: &mut Vec<T>,
    index: usize,
    what: &'static str,
) -> DomainResult<T> {
    if index >= items.len() {
        return Err(DomainError::out_of_bounds(what, index, items.len()));
    }
    Ok(items.remove(index))
}

/// Picks the neighbour to focus after `index` goes away: the next item,
/// or the previous one when `index` is last. An unknown index falls back
/// to the first item.
#[must_use]
pub fn closest_item<T>(items: &[T], index: Option<usize>) -> Option<&T> {
    match index {
        Some(i) if i + 1 < items.len() => items.get(i + 1),
        Some(i) if i > 0 && i < items.len() => items.get(i - 1),
        Some(_) => None,
        None => items.first(),
    }
}

/// Splits a `/`-delimited tree path into its non-empty segments.
#[must_use]
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}
