//! Row selection by identifier.
//!
//! Selection is independent of sort order and page: it holds ids, and the
//! selected rows are always materialized from the full, unsorted row set.

use crate::model::Row;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// How many rows may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one row (radio-button style).
    Single,
    /// Any number of rows (checkbox style).
    #[default]
    Multiple,
}

/// Set of selected row ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: Eq + Hash> {
    selected: HashSet<K>,
}

impl<K: Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterate over the selected keys in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }

    /// Drop keys for which `keep` returns false. Returns true if anything was dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) -> bool {
        let before = self.selected.len();
        self.selected.retain(|key| keep(key));
        self.selected.len() != before
    }
}

impl<K: Clone + Eq + Hash> FromIterator<K> for Selection<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

/// Selection after activating the row with `key`.
///
/// - single: the sole selected row is deselected; any other row replaces the selection
/// - multiple: the row's membership flips, other rows are untouched
pub fn toggle_row<K: Clone + Eq + Hash>(
    selection: &Selection<K>,
    key: &K,
    mode: SelectionMode,
) -> Selection<K> {
    match mode {
        SelectionMode::Single => {
            if selection.is_selected(key) {
                Selection::new()
            } else {
                std::iter::once(key.clone()).collect()
            }
        }
        SelectionMode::Multiple => {
            let mut next = selection.clone();
            if !next.selected.remove(key) {
                next.selected.insert(key.clone());
            }
            next
        }
    }
}

/// Selection after activating the select-all control.
///
/// In multiple mode this toggles between everything and nothing: when the
/// selection already holds as many ids as there are rows it is cleared,
/// otherwise every id is selected. In single mode it does nothing.
pub fn toggle_all<K: Clone + Eq + Hash>(
    selection: &Selection<K>,
    all_keys: &[K],
    mode: SelectionMode,
) -> Selection<K> {
    match mode {
        SelectionMode::Single => selection.clone(),
        SelectionMode::Multiple => {
            if selection.len() == all_keys.len() {
                Selection::new()
            } else {
                all_keys.iter().cloned().collect()
            }
        }
    }
}

/// The selected rows, in the order they appear in `rows`.
pub fn materialize<R: Row>(rows: &[R], selection: &Selection<R::Id>) -> Vec<R> {
    rows.iter()
        .filter(|row| selection.is_selected(&row.id()))
        .cloned()
        .collect()
}

/// Whether every row is selected. False when there are no rows.
pub fn is_all_selected<K: Clone + Eq + Hash>(selection: &Selection<K>, total_rows: usize) -> bool {
    total_rows > 0 && selection.len() == total_rows
}

/// Whether some but not all rows are selected (the select-all control's mixed state).
pub fn is_partially_selected<K: Clone + Eq + Hash>(
    selection: &Selection<K>,
    total_rows: usize,
) -> bool {
    !selection.is_empty() && selection.len() < total_rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(keys: &[u32]) -> Selection<u32> {
        keys.iter().copied().collect()
    }

    #[test]
    fn single_mode_replaces_previous_selection() {
        let after_a = toggle_row(&Selection::new(), &1, SelectionMode::Single);
        let after_b = toggle_row(&after_a, &2, SelectionMode::Single);
        assert_eq!(after_b, selection(&[2]));
    }

    #[test]
    fn single_mode_toggling_selected_row_clears() {
        let after = toggle_row(&selection(&[4]), &4, SelectionMode::Single);
        assert!(after.is_empty());
    }

    #[test]
    fn multiple_mode_flips_only_that_row() {
        let start = selection(&[1, 2]);
        assert_eq!(toggle_row(&start, &3, SelectionMode::Multiple), selection(&[1, 2, 3]));
        assert_eq!(toggle_row(&start, &2, SelectionMode::Multiple), selection(&[1]));
    }

    #[test]
    fn select_all_selects_everything_then_clears() {
        let all = [1, 2, 3, 4, 5, 6];
        let once = toggle_all(&Selection::new(), &all, SelectionMode::Multiple);
        assert_eq!(once, selection(&all));
        let twice = toggle_all(&once, &all, SelectionMode::Multiple);
        assert!(twice.is_empty());
    }

    #[test]
    fn select_all_from_partial_selects_everything() {
        let all = [1, 2, 3];
        let after = toggle_all(&selection(&[2]), &all, SelectionMode::Multiple);
        assert_eq!(after, selection(&all));
    }

    #[test]
    fn select_all_is_noop_in_single_mode() {
        let start = selection(&[2]);
        assert_eq!(toggle_all(&start, &[1, 2, 3], SelectionMode::Single), start);
    }

    #[test]
    fn retain_reports_whether_anything_was_dropped() {
        let mut current = selection(&[1, 2, 3]);
        assert!(current.retain(|k| *k != 2));
        assert_eq!(current, selection(&[1, 3]));
        assert!(!current.retain(|_| true));
    }

    #[test]
    fn mixed_state_flags() {
        assert!(is_partially_selected(&selection(&[1]), 3));
        assert!(!is_partially_selected(&selection(&[1, 2, 3]), 3));
        assert!(!is_partially_selected(&Selection::<u32>::new(), 3));
        assert!(is_all_selected(&selection(&[1, 2, 3]), 3));
        assert!(!is_all_selected(&Selection::<u32>::new(), 0));
    }

    #[test]
    fn mode_defaults_to_multiple() {
        assert_eq!(SelectionMode::default(), SelectionMode::Multiple);
    }
}
