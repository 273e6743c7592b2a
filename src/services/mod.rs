//! External collaborator boundaries.

pub mod price_data;

pub use price_data::*;
