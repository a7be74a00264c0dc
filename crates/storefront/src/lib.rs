//! OrderTrail Storefront library.
//!
//! This crate provides the order tracking service as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod orders;
pub mod routes;
pub mod state;
