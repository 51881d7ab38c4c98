//! Data models
//!
//! Shared between dockslot-server and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps Unix
//! millis, all money integer cents.

pub mod blackout_date;
pub mod booking;
pub mod booking_log;
pub mod profile;
pub mod trip_type;
pub mod vessel;

// Re-exports
pub use blackout_date::*;
pub use booking::*;
pub use booking_log::*;
pub use profile::*;
pub use trip_type::*;
pub use vessel::*;
