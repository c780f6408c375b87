//! In-memory session storage using moka
//!
//! Each browser session owns exactly one `SelectionState`. Sessions live
//! only in memory and age out after a period of inactivity; there is no
//! persistence and no sharing between sessions.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::selection::SelectionState;

/// Store of live calculator sessions
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<Mutex<SelectionState>>>,
}

impl SessionStore {
    /// Create a new store with configured bounds
    pub fn new() -> Self {
        Self {
            // 10k concurrent sessions, evicted after 30 min idle
            sessions: Cache::builder()
                .max_capacity(10_000)
                .time_to_idle(Duration::from_secs(30 * 60))
                .build(),
        }
    }

    /// Create a fresh session and return its id
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .insert(id, Arc::new(Mutex::new(SelectionState::default())))
            .await;
        id
    }

    /// Look up a live session. `None` once it has been evicted.
    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<SelectionState>>> {
        self.sessions.get(&id).await
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
