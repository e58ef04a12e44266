//! Pure projection of a day's slots into the court-by-time grid.
//!
//! Rows are time ranges, columns are courts. Building the grid never
//! mutates its inputs, so rebuilding from the same slots and courts is
//! idempotent and the grid can be re-derived after every refresh.

use std::collections::BTreeMap;

use crate::dates::time_range_key;
use crate::model::{Court, TimeSlot};
use crate::status::{CellStyle, SlotStatus};
use crate::types::Id;

/// The grid shows at most this many courts side by side.
pub const GRID_COURT_COLUMNS: usize = 4;

/// Text shown in cells with no slot on the wire.
pub const NOT_RESERVABLE_LABEL: &str = "Not reservable";

#[derive(Debug, Clone, PartialEq)]
pub struct CourtColumn {
    pub court_id: Id,
    pub name: String,
}

/// One time range across all displayed courts. `cells` always has one
/// entry per column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub time_range: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    /// The service published no slot for this court and time range.
    NotReservable,
    Slot(SlotCell),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotCell {
    pub slot_id: Id,
    pub court_id: Id,
    pub status: SlotStatus,
    pub label: String,
    pub style: CellStyle,
    /// Clicking opens the apply flow. Only `available` cells qualify;
    /// anything else (including unknown statuses) just reports why not.
    pub clickable: bool,
    pub applications_count: Option<i64>,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    pub columns: Vec<CourtColumn>,
    pub rows: Vec<GridRow>,
}

/// What a click on a slot cell should do.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Apply { slot_id: Id },
    NotBookable { message: String },
    /// The clicked id is not in the current slot list, e.g. a stale
    /// render after a refresh. Nothing to do.
    UnknownSlot,
}

/// Groups `slots` by time range and lays them out under the first
/// [`GRID_COURT_COLUMNS`] courts. Slots on courts beyond the column
/// limit are not displayed.
pub fn build_grid(slots: &[TimeSlot], courts: &[Court]) -> SlotGrid {
    let columns: Vec<CourtColumn> = courts
        .iter()
        .take(GRID_COURT_COLUMNS)
        .map(|court| CourtColumn {
            court_id: court.id,
            name: court.name.clone(),
        })
        .collect();

    // BTreeMap keys are zero-padded "HH:MM - HH:MM" strings, so the
    // lexicographic iteration order is chronological.
    let mut by_range: BTreeMap<String, Vec<&TimeSlot>> = BTreeMap::new();
    for slot in slots {
        by_range
            .entry(time_range_key(&slot.start_time, &slot.end_time))
            .or_default()
            .push(slot);
    }

    let rows = by_range
        .into_iter()
        .map(|(time_range, group)| {
            let cells = columns
                .iter()
                .map(|column| {
                    match group.iter().find(|slot| slot.court_id == column.court_id) {
                        Some(slot) => GridCell::Slot(SlotCell {
                            slot_id: slot.id,
                            court_id: slot.court_id,
                            status: slot.status.clone(),
                            label: slot.status.label().to_string(),
                            style: slot.status.style(),
                            clickable: slot.status.is_bookable(),
                            applications_count: slot.applications_count,
                            price: slot.price,
                        }),
                        None => GridCell::NotReservable,
                    }
                })
                .collect();
            GridRow { time_range, cells }
        })
        .collect();

    SlotGrid { columns, rows }
}

/// Resolves a click on slot `slot_id` against the current slot list.
pub fn click_slot(slots: &[TimeSlot], slot_id: Id) -> ClickOutcome {
    let Some(slot) = slots.iter().find(|slot| slot.id == slot_id) else {
        return ClickOutcome::UnknownSlot;
    };
    if slot.status.is_bookable() {
        return ClickOutcome::Apply { slot_id: slot.id };
    }
    let message = match &slot.status {
        SlotStatus::HasApplications => "This slot already has applicants".to_string(),
        SlotStatus::Reserved => "This slot is already reserved".to_string(),
        other => format!("This slot cannot be applied for ({})", other.label()),
    };
    ClickOutcome::NotBookable { message }
}
