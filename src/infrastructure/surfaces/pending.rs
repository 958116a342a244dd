#[cfg(test)]
#[path = "pending_test.rs"]
mod tests;

use dashmap::DashMap;
use tokio::sync::oneshot;

use crate::domain::models::ProblemContext;

/// Table of outstanding context requests. Each request resolves at most
/// once; a response arriving after its request was abandoned is discarded.
#[derive(Default)]
pub struct PendingContexts {
    waiting: DashMap<String, oneshot::Sender<ProblemContext>>,
}

impl PendingContexts {
    pub fn register(&self, request_id: &str) -> oneshot::Receiver<ProblemContext> {
        let (tx, rx) = oneshot::channel::<ProblemContext>();
        self.waiting.insert(request_id.to_string(), tx);
        return rx;
    }

    /// Hands the context to whoever is waiting. Returns false for unknown
    /// or abandoned requests, whose responses are dropped on the floor.
    pub fn resolve(&self, request_id: &str, context: ProblemContext) -> bool {
        let (_key, tx) = match self.waiting.remove(request_id) {
            Some(entry) => entry,
            None => return false,
        };

        return tx.send(context).is_ok();
    }

    pub fn discard(&self, request_id: &str) {
        self.waiting.remove(request_id);
    }
}
