//! Data Transfer Objects for the job service API
//!
//! Lightweight representations of the JSON bodies returned by the
//! job service. Fields the client does not rely on are ignored on decode.

pub mod job;
