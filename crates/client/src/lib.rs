//! HTTP client for the court booking service.
//!
//! - [`BookingApi`]: the service contract as an async trait, so the
//!   app logic can run against an in-memory fake in tests.
//! - [`HttpApi`]: the [`reqwest`] implementation used by the binary.
//! - [`ApiError`]: transport failures and non-2xx responses, with the
//!   server's `message` preserved for display.

pub mod api;
pub mod error;
pub mod http;

pub use api::{
    ApplyOutcome, BookingApi, CancelOutcome, LoginOutcome, RecordsPage, RegisterOutcome,
    RegisterRequest,
};
pub use error::ApiError;
pub use http::HttpApi;
