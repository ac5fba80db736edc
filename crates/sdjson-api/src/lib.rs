//! Client library for the Schedules Direct JSON listings service.
//!
//! [`SdClient`] authenticates with a SHA-1 hashed password, keeps the
//! session token fresh, and exposes one async method per service operation
//! through [`SchedulesDirectApi`]. Replies are decoded into the records in
//! [`types`], tolerating the service's loosely typed JSON via [`wire`].

mod api;
mod client;
mod endpoints;
/// Error types.
pub mod error;
/// Service error codes.
pub mod error_code;
/// Session and token state.
pub mod session;
#[cfg(test)]
mod test_support;
/// Request and response records.
pub mod types;
/// Loosely typed JSON scalars.
pub mod wire;

pub use api::{LocalSchedulesDirectApi, SchedulesDirectApi};
pub use client::{
    ApiRequest, BatchLimits, DEFAULT_API_VERSION, SdClient, SdClientBuilder, decode_json,
    decode_lines,
};
pub use error::{Error, Result, ServiceError};
pub use error_code::ErrorCode;
pub use session::{Credentials, SessionState};
