//! Multi-slot selection for the booking summary panel.

use std::collections::BTreeMap;

use crate::types::Id;

/// One picked cell. Identity is `(time_range, court_id)`; price and
/// court name ride along for display only.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSlot {
    pub time_range: String,
    pub court_id: Id,
    pub court_name: String,
    pub price: f64,
}

/// The set of cells the student has picked for the current date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    entries: Vec<SelectedSlot>,
}

impl Selection {
    /// Adds the slot, or removes it when the same `(time_range,
    /// court_id)` pair is already selected. Returns `true` when the
    /// slot was added.
    pub fn toggle(&mut self, entry: SelectedSlot) -> bool {
        let existing = self
            .entries
            .iter()
            .position(|e| e.time_range == entry.time_range && e.court_id == entry.court_id);
        match existing {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.entries.push(entry);
                true
            }
        }
    }

    pub fn contains(&self, time_range: &str, court_id: Id) -> bool {
        self.entries
            .iter()
            .any(|e| e.time_range == time_range && e.court_id == court_id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[SelectedSlot] {
        &self.entries
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.price).sum()
    }

    /// Entries grouped per court, courts in ascending id order. Entries
    /// within a court keep their selection order.
    pub fn by_court(&self) -> Vec<(Id, Vec<&SelectedSlot>)> {
        let mut groups: BTreeMap<Id, Vec<&SelectedSlot>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.court_id).or_default().push(entry);
        }
        groups.into_iter().collect()
    }
}
