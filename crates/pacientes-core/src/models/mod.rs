//! Domain models for the patient registry.

mod filter;
mod patient;

pub use filter::*;
pub use patient::*;
