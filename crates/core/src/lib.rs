//! OrderTrail Core - Shared types library.
//!
//! This crate provides the domain types used across OrderTrail components:
//! - `storefront` - Customer-facing order tracking service
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Status
//! enumerations are closed: every consumer dispatches on them with an
//! exhaustive `match`, so adding a variant is a compile-time event across
//! the workspace.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
