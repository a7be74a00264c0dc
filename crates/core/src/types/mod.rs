//! Core types for OrderTrail.

pub mod money;
pub mod status;

pub use money::Money;
pub use status::{OrderStatus, TrackingStatus};
