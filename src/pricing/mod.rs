//! Cost estimation for vehicle ownership.
//!
//! Pure calculation functions, the static IPVA rate table, and the DTOs of
//! the calculator's JSON API.

pub mod calculators;
pub mod rates;
pub mod requests;
pub mod responses;

// Re-export commonly used items
pub use calculators::{round_money, ExpenseForm};
pub use rates::Region;
