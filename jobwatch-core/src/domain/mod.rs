//! Core domain types
//!
//! These types describe the single job a client tracks and the file it
//! uploads. They are shared between the HTTP client (decoding) and the
//! poller (state transitions).

pub mod job;
pub mod upload;
