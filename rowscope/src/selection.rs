//! Selection state management.
//!
//! Selection is tracked by row key, so it stays stable when the data owner
//! reorders or replaces the row array. The range anchor is tracked
//! explicitly: it is the key of the last exclusive select or toggle, never
//! derived from the set.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::input::SelectModifiers;
use crate::row::RowIndex;

/// Selection mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// No selection allowed
    None,
    /// Single row selection
    Single,
    /// Multiple rows can be selected (Ctrl+click, Shift+range)
    #[default]
    Multiple,
}

/// Key-based selection state.
#[derive(Debug, Clone)]
pub struct Selection<K> {
    mode: SelectionMode,
    /// Currently selected keys
    selected: HashSet<K>,
    /// Anchor for range selection (Shift+click starting point)
    anchor: Option<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create an empty selection.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
            anchor: None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the mode. Switching to `None` clears, switching to `Single`
    /// keeps at most the anchor row.
    pub fn set_mode(&mut self, mode: SelectionMode) -> bool {
        self.mode = mode;
        match mode {
            SelectionMode::None => self.clear(),
            SelectionMode::Single if self.selected.len() > 1 => {
                let keep = self
                    .anchor
                    .clone()
                    .filter(|a| self.selected.contains(a));
                self.selected.clear();
                if let Some(key) = keep {
                    self.selected.insert(key);
                }
                true
            }
            _ => false,
        }
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Get the anchor key for range selection.
    pub fn anchor(&self) -> Option<&K> {
        self.anchor.as_ref()
    }

    /// Selected keys in row order.
    pub fn keys_in_order(&self, rows: &RowIndex<K>) -> Vec<K> {
        rows.keys()
            .iter()
            .filter(|k| self.selected.contains(*k))
            .cloned()
            .collect()
    }

    /// Apply a selection gesture to a row.
    ///
    /// Returns true if the selected set changed. Keys not present in `rows`
    /// are ignored.
    pub fn select_row(&mut self, key: &K, modifiers: SelectModifiers, rows: &RowIndex<K>) -> bool {
        if !rows.contains(key) {
            return false;
        }
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if modifiers.toggle && self.selected.contains(key) {
                    self.anchor = Some(key.clone());
                    self.selected.clear();
                    true
                } else {
                    self.select(key)
                }
            }
            SelectionMode::Multiple => {
                if modifiers.range {
                    self.range_select(key, rows, modifiers.toggle)
                } else if modifiers.toggle {
                    self.toggle(key)
                } else {
                    self.select(key)
                }
            }
        }
    }

    /// Exclusive select. Sets the anchor.
    fn select(&mut self, key: &K) -> bool {
        let changed = self.selected.len() != 1 || !self.selected.contains(key);
        self.selected.clear();
        self.selected.insert(key.clone());
        self.anchor = Some(key.clone());
        changed
    }

    /// Flip membership. Sets the anchor.
    fn toggle(&mut self, key: &K) -> bool {
        if !self.selected.remove(key) {
            self.selected.insert(key.clone());
        }
        self.anchor = Some(key.clone());
        true
    }

    /// Select the inclusive index range between the anchor and `target`.
    ///
    /// The range replaces the selection unless `extend` is set. Without a
    /// selected, still-present anchor this falls back to an exclusive select.
    /// The anchor itself does not move.
    fn range_select(&mut self, target: &K, rows: &RowIndex<K>, extend: bool) -> bool {
        let anchor_pos = self
            .anchor
            .as_ref()
            .filter(|a| self.selected.contains(*a))
            .and_then(|a| rows.position(a));

        let (Some(a), Some(t)) = (anchor_pos, rows.position(target)) else {
            return self.select(target);
        };

        let (start, end) = if a <= t { (a, t) } else { (t, a) };
        let range: HashSet<K> = rows.keys()[start..=end].iter().cloned().collect();

        let before = self.selected.len();
        let changed = if extend {
            let mut added = false;
            for key in range {
                added |= self.selected.insert(key);
            }
            added
        } else {
            let changed = before != range.len() || !range.iter().all(|k| self.selected.contains(k));
            self.selected = range;
            changed
        };
        log::debug!(
            "[selection] range {}..={} (extend: {}), {} selected",
            start,
            end,
            extend,
            self.selected.len()
        );
        changed
    }

    /// Select every row. Ignored unless the mode is `Multiple`.
    pub fn select_all(&mut self, rows: &RowIndex<K>) -> bool {
        if self.mode != SelectionMode::Multiple {
            return false;
        }
        let mut changed = false;
        for key in rows.keys() {
            changed |= self.selected.insert(key.clone());
        }
        changed
    }

    /// Clear all selection and the anchor.
    pub fn clear(&mut self) -> bool {
        self.anchor = None;
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    /// Drop keys that are no longer in the row array.
    ///
    /// The anchor is dropped too if its row disappeared. Returns true if
    /// the selected set changed.
    pub fn retain_present(&mut self, rows: &RowIndex<K>) -> bool {
        if self.anchor.as_ref().is_some_and(|a| !rows.contains(a)) {
            self.anchor = None;
        }
        let before = self.selected.len();
        self.selected.retain(|k| rows.contains(k));
        let pruned = before - self.selected.len();
        if pruned > 0 {
            log::debug!("[selection] pruned {} stale keys", pruned);
        }
        pruned > 0
    }
}
