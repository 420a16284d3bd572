//! Core types and trait definitions for the HRMS records service.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the job-assignment lifecycle rules ([`guard::AssignmentGuard`]) and the
//! store contracts every backend implements.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod assignment;
pub mod error;
pub mod form;
pub mod guard;
pub mod performance;
pub mod record;
pub mod store;
pub mod training;

pub use error::{Error, GuardError, Result};
