//! Worker lifecycle control seam
//!
//! The browser lets a service worker skip the waiting phase on install and
//! claim existing page clients on activation. [`WorkerHost`] abstracts those
//! two calls; [`MemoryHost`] records them for embedders and tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

/// Lifecycle controls supplied by the hosting runtime
#[async_trait]
pub trait WorkerHost: Send + Sync {
    /// Activate the newly installed worker without waiting for old instances.
    async fn skip_waiting(&self);

    /// Take control of existing page clients so new worker logic applies
    /// without a page reload.
    async fn claim_clients(&self);
}

/// Host that records lifecycle calls
#[derive(Debug, Default)]
pub struct MemoryHost {
    waiting_skipped: AtomicBool,
    clients_claimed: AtomicBool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waiting_skipped(&self) -> bool {
        self.waiting_skipped.load(Ordering::SeqCst)
    }

    pub fn clients_claimed(&self) -> bool {
        self.clients_claimed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkerHost for MemoryHost {
    async fn skip_waiting(&self) {
        self.waiting_skipped.store(true, Ordering::SeqCst);
    }

    async fn claim_clients(&self) {
        self.clients_claimed.store(true, Ordering::SeqCst);
    }
}
