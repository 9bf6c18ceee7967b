use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tracing::trace;

use crate::store::ProfileStore;

use super::HandleRejection;
use super::availability::HandleResolver;
use super::syntax::Handle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// A newer request arrived during the debounce delay; nothing was sent.
    Superseded { seq: u64 },
    /// A newer request arrived while the store was answering.
    Stale { seq: u64 },
    Completed {
        seq: u64,
        candidate: String,
        verdict: Result<Handle, HandleRejection>,
    },
}

impl CheckOutcome {
    pub fn seq(&self) -> u64 {
        match self {
            CheckOutcome::Superseded { seq }
            | CheckOutcome::Stale { seq }
            | CheckOutcome::Completed { seq, .. } => *seq,
        }
    }
}

/// Debounced availability checks for a handle input. Each call takes a
/// sequence number; only the result of the most recent call is kept, so a
/// slow response can never overwrite a newer verdict.
pub struct HandleCheckSequencer<S: ?Sized> {
    resolver: HandleResolver<S>,
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl<S: ?Sized> Clone for HandleCheckSequencer<S> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            delay: self.delay,
            latest: Arc::clone(&self.latest),
        }
    }
}

impl<S: ProfileStore + ?Sized> HandleCheckSequencer<S> {
    pub fn new(resolver: HandleResolver<S>, delay: Duration) -> Self {
        Self {
            resolver,
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub async fn check(&self, candidate: String, exclude_profile_id: Option<String>) -> CheckOutcome {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.delay).await;
        if !self.is_current(seq) {
            trace!(seq, "handle check superseded before dispatch");
            return CheckOutcome::Superseded { seq };
        }

        let verdict = self
            .resolver
            .reserve_or_reject_handle(&candidate, exclude_profile_id.as_deref())
            .await;

        if !self.is_current(seq) {
            trace!(seq, "discarding stale handle check result");
            return CheckOutcome::Stale { seq };
        }

        CheckOutcome::Completed {
            seq,
            candidate,
            verdict,
        }
    }

    fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }
}
