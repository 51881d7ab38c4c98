//! Booking lifecycle types
//!
//! 预订状态机：所有状态变更都必须经过 [`transition`]，
//! handler 层不允许自行判断状态。

mod status;

pub use status::{BookingAction, BookingStatus, PaymentStatus, TransitionError, transition};
