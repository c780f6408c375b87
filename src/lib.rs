//! AutoCusto: annual vehicle ownership cost calculator.
//!
//! A single-page form backed by the public FIPE reference-pricing service.
//! The cascade of dependent selections, the IPVA rate table, and the cost
//! aggregation live here; `main.rs` only wires the server together.

pub mod config;
pub mod error;
pub mod fipe;
pub mod pricing;
pub mod routes;
pub mod selection;
pub mod session;

use std::sync::Arc;

use fipe::FipeClient;
use session::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub fipe: Arc<FipeClient>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(fipe: FipeClient) -> Self {
        Self {
            fipe: Arc::new(fipe),
            sessions: SessionStore::new(),
        }
    }
}
