//! Guest-side access to a table: resolving its token and calling staff.

pub mod client;
pub mod http;
pub mod throttle;

pub use client::{GuestApi, GuestClient, ResolvedTable};
pub use http::HttpGuestApi;
pub use throttle::{Refusal, SubmissionThrottle};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("This table link is invalid or closed")]
    Unavailable,
    #[error("Please wait a moment before calling again")]
    Throttled,
    #[error("Unknown request type")]
    InvalidInput,
    #[error("Could not reach the restaurant, please try again ({0})")]
    Transient(String),
}
