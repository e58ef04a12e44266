//! Court booking terminal client: owned state, actions, rendering and
//! the session store. The `courtbook` binary wires these together; the
//! pieces here stay free of printing and direct I/O (the session store
//! excepted) so integration tests can drive whole flows against an
//! in-memory service fake.

pub mod actions;
pub mod commands;
pub mod config;
pub mod error;
pub mod notice;
pub mod render;
pub mod session;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use notice::{Notice, NoticeLevel};
pub use session::{SessionData, SessionError, SessionStore};
pub use state::{BookingState, View};
