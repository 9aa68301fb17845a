//! Jobwatch Core
//!
//! Core types shared by the jobwatch client, poller and CLI.
//!
//! This crate contains:
//! - Domain types: the tracked Job, its server and local statuses, upload files
//! - DTOs: wire shapes of the job service's submit/status/result endpoints

pub mod domain;
pub mod dto;
