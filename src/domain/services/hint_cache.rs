#[cfg(test)]
#[path = "hint_cache_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path;

use dashmap::DashMap;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;

const CACHE_FILE: &str = "hint-cache.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CachedHint {
    pub text: String,
    pub cached_at: i64,
}

/// Short-TTL store of generated hints plus the per-problem gate that keeps
/// the coordinator from hammering the generation service. Cached hints are
/// durable; call marks are not worth surviving a restart.
pub struct HintCache {
    path: path::PathBuf,
    ttl_ms: i64,
    min_interval_ms: i64,
    hints: DashMap<String, CachedHint>,
    call_marks: DashMap<String, i64>,
}

impl HintCache {
    pub async fn load(data_dir: &path::Path, ttl_ms: i64, min_interval_ms: i64) -> HintCache {
        let cache = HintCache {
            path: data_dir.join(CACHE_FILE),
            ttl_ms,
            min_interval_ms,
            hints: DashMap::new(),
            call_marks: DashMap::new(),
        };

        if !cache.path.exists() {
            return cache;
        }

        match fs::read_to_string(&cache.path).await {
            Ok(payload) => match serde_json::from_str::<BTreeMap<String, CachedHint>>(&payload) {
                Ok(hints) => {
                    for (problem_id, hint) in hints {
                        cache.hints.insert(problem_id, hint);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = ?err, "Hint cache file is corrupt, starting empty");
                }
            },
            Err(err) => {
                tracing::warn!(error = ?err, "Hint cache file is unreadable, starting empty");
            }
        }

        return cache;
    }

    /// A hint still inside its TTL. Stale entries are never served as fresh.
    pub fn fresh(&self, problem_id: &str, now_ms: i64) -> Option<String> {
        let entry = self.hints.get(problem_id)?;
        if now_ms - entry.cached_at <= self.ttl_ms {
            return Some(entry.text.to_string());
        }

        return None;
    }

    /// Whatever is cached, age ignored. Last-resort input for the fallback
    /// chain when the generation service is unavailable.
    pub fn stale(&self, problem_id: &str) -> Option<String> {
        return self
            .hints
            .get(problem_id)
            .map(|entry| return entry.text.to_string());
    }

    pub async fn put(&self, problem_id: &str, text: &str, now_ms: i64) {
        self.hints.insert(
            problem_id.to_string(),
            CachedHint {
                text: text.to_string(),
                cached_at: now_ms,
            },
        );

        self.persist().await;
    }

    /// True while the minimum interval since the last generator call for
    /// this problem has not elapsed. Never gates cache reads or local
    /// generation.
    pub fn rate_limited(&self, problem_id: &str, now_ms: i64) -> bool {
        if let Some(last_call) = self.call_marks.get(problem_id) {
            return now_ms - *last_call < self.min_interval_ms;
        }

        return false;
    }

    /// Marks the call before the request is issued, so a slow response
    /// cannot let a burst of retries through the gate.
    pub fn record_call(&self, problem_id: &str, now_ms: i64) {
        self.call_marks.insert(problem_id.to_string(), now_ms);
    }

    pub async fn reset(&self) {
        self.hints.clear();
        self.call_marks.clear();
        self.persist().await;
    }

    fn snapshot(&self) -> BTreeMap<String, CachedHint> {
        return self
            .hints
            .iter()
            .map(|entry| return (entry.key().to_string(), entry.value().clone()))
            .collect();
    }

    async fn persist(&self) {
        let payload = match serde_json::to_string_pretty(&self.snapshot()) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to serialize hint cache");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                if let Err(err) = fs::create_dir_all(parent).await {
                    tracing::warn!(error = ?err, "Failed to create hint cache directory");
                    return;
                }
            }
        }

        if let Err(err) = fs::write(&self.path, payload).await {
            tracing::warn!(error = ?err, "Failed to persist hint cache");
        }
    }
}
