#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path;

use dashmap::DashMap;
use tokio::fs;

use crate::domain::models::HINT_CAP;

const LEDGER_FILE: &str = "ledger.json";

/// Durable per-problem hint counts. Counts only ever grow, one increment
/// per delivered hint, and survive restarts; reset is the single way down.
pub struct HintLedger {
    path: path::PathBuf,
    counts: DashMap<String, u32>,
}

impl HintLedger {
    /// Loads the ledger from the data directory. A missing file is an empty
    /// ledger; an unreadable one is logged and treated as empty rather than
    /// blocking startup.
    pub async fn load(data_dir: &path::Path) -> HintLedger {
        let ledger = HintLedger {
            path: data_dir.join(LEDGER_FILE),
            counts: DashMap::new(),
        };

        if !ledger.path.exists() {
            return ledger;
        }

        match fs::read_to_string(&ledger.path).await {
            Ok(payload) => match serde_json::from_str::<BTreeMap<String, u32>>(&payload) {
                Ok(counts) => {
                    for (problem_id, count) in counts {
                        ledger.counts.insert(problem_id, count);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = ?err, "Ledger file is corrupt, starting empty");
                }
            },
            Err(err) => {
                tracing::warn!(error = ?err, "Ledger file is unreadable, starting empty");
            }
        }

        return ledger;
    }

    pub fn count(&self, problem_id: &str) -> u32 {
        if let Some(count) = self.counts.get(problem_id) {
            return *count;
        }

        return 0;
    }

    pub fn cap_reached(&self, problem_id: &str) -> bool {
        return self.count(problem_id) >= HINT_CAP;
    }

    /// Records one delivered hint and persists. Called exactly once per
    /// delivery, after the hint text is in hand, never before.
    pub async fn commit_increment(&self, problem_id: &str) -> u32 {
        let new_count;
        {
            let mut entry = self.counts.entry(problem_id.to_string()).or_insert(0);
            if *entry < HINT_CAP {
                *entry += 1;
            }
            new_count = *entry;
        }

        self.persist().await;
        return new_count;
    }

    pub async fn reset(&self) {
        self.counts.clear();
        self.persist().await;
    }

    fn snapshot(&self) -> BTreeMap<String, u32> {
        return self
            .counts
            .iter()
            .map(|entry| return (entry.key().to_string(), *entry.value()))
            .collect();
    }

    /// Whole-file overwrite. A failed write keeps the in-memory counts
    /// authoritative; the request that triggered it still completes.
    async fn persist(&self) {
        let payload = match serde_json::to_string_pretty(&self.snapshot()) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to serialize ledger");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                if let Err(err) = fs::create_dir_all(parent).await {
                    tracing::warn!(error = ?err, "Failed to create ledger directory");
                    return;
                }
            }
        }

        if let Err(err) = fs::write(&self.path, payload).await {
            tracing::warn!(error = ?err, "Failed to persist ledger");
        }
    }
}
