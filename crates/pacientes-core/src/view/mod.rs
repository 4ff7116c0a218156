//! View layer: pure display projections and the controller that translates
//! user actions into record store calls.

mod controller;
mod render;

pub use controller::*;
pub use render::*;
