//! Domain logic for the court booking client.
//!
//! Everything in this crate is pure and synchronous:
//!
//! - [`model`]: wire-shaped records the booking service returns.
//! - [`status`]: slot/application/record status vocabularies with a
//!   catch-all for values this client does not know yet.
//! - [`grid`]: projection of a day's slots into the court-by-time
//!   grid, plus click resolution.
//! - [`selection`]: the multi-slot pick set and its totals.
//! - [`dates`]: the bookable date window and time formatting.
//!
//! No I/O and no async, so all of it is exercisable from plain unit
//! tests.

pub mod dates;
pub mod error;
pub mod grid;
pub mod model;
pub mod selection;
pub mod status;
pub mod types;

pub use dates::{display_time, time_range_key, BookingWindow, BOOKING_WINDOW_DAYS};
pub use error::CoreError;
pub use grid::{
    build_grid, click_slot, ClickOutcome, CourtColumn, GridCell, GridRow, SlotCell, SlotGrid,
    GRID_COURT_COLUMNS, NOT_RESERVABLE_LABEL,
};
pub use model::{Application, Court, CreditSummary, ReservationRecord, Student, TimeSlot};
pub use selection::{SelectedSlot, Selection};
pub use status::{ApplicationStatus, CellStyle, RecordStatus, SlotStatus};
pub use types::Id;
