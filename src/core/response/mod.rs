//! Donor response handling

pub mod handler;

pub use handler::{ResponseHandler, ResponseOutcome};
