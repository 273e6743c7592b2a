//! Notification ledger and its persistence boundary.

pub mod notification_store;
pub mod persistence;

pub use notification_store::*;
pub use persistence::*;
