use courtbook_client::ApiError;
use courtbook_core::{CoreError, Id};

use crate::session::SessionError;

/// Everything an action can fail with. Precondition variants fire
/// before any network call; `Api` wraps whatever the transport
/// reported. All of these end up as dismissible notices, none abort
/// the app.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("please sign in first")]
    NotLoggedIn,

    #[error(transparent)]
    DateOutOfRange(#[from] CoreError),

    #[error("slot {slot_id} is not in the current list, refresh and try again")]
    UnknownSlot { slot_id: Id },

    #[error("this slot is not open for applications ({label})")]
    SlotNotBookable { label: String },

    #[error("application {application_id} is not in the current list, refresh and try again")]
    UnknownApplication { application_id: Id },

    #[error("only pending applications can be cancelled, this one is {label}")]
    NotCancellable { label: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AppError {
    /// True when the service rejected our credential and the session
    /// should be dropped.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_unauthorized())
    }
}
