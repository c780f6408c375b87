//! FIPE reference-pricing lookups.
//!
//! The public FIPE API serves the vehicle cascade (manufacturers -> models ->
//! model-years -> priced vehicle record), scoped by vehicle category. This
//! module wraps it in a typed client plus the domain records it returns.

pub mod client;
pub mod models;

// Re-export commonly used items
pub use client::{FipeClient, LookupError};
pub use models::{PricedVehicle, SelectionOption, VehicleCategory};
