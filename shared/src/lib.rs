//! Shared types for DockSlot
//!
//! Common types used by the server and API consumers: data models,
//! the booking status state machine, and ID/time utilities.

pub mod booking;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// State machine re-exports (for convenient access)
pub use booking::{BookingAction, BookingStatus, PaymentStatus, TransitionError, transition};
