#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use super::ActivityTracker;
use super::Excerpts;
use super::Heuristics;
use super::HintCache;
use super::HintLedger;
use super::SettingsStore;
use crate::domain::models::GeneratePayload;
use crate::domain::models::GeneratorBox;
use crate::domain::models::HintDelivery;
use crate::domain::models::HintOutcome;
use crate::domain::models::HintSource;
use crate::domain::models::ProblemContext;
use crate::domain::models::RequestError;
use crate::domain::models::SurfaceBox;
use crate::domain::models::HINT_CAP;

/// The control component. On a hint request it collects context, checks the
/// ledger cap, fetches a hint through the fallback chain, delivers it, and
/// only then commits the ledger increment. Generator trouble never escapes
/// this type; the caller either gets an outcome or one of the two surfaced
/// request failures.
pub struct Orchestrator {
    tracker: Arc<ActivityTracker>,
    settings: Arc<SettingsStore>,
    ledger: HintLedger,
    cache: HintCache,
    generator: GeneratorBox,
    surface: SurfaceBox,
    gates: DashMap<String, Arc<Mutex<()>>>,
}

impl Orchestrator {
    pub fn new(
        tracker: Arc<ActivityTracker>,
        settings: Arc<SettingsStore>,
        ledger: HintLedger,
        cache: HintCache,
        generator: GeneratorBox,
        surface: SurfaceBox,
    ) -> Orchestrator {
        return Orchestrator {
            tracker,
            settings,
            ledger,
            cache,
            generator,
            surface,
            gates: DashMap::new(),
        };
    }

    pub async fn request_hint(
        &self,
        session_id: &str,
        now_ms: i64,
    ) -> Result<HintOutcome, RequestError> {
        if !self.tracker.is_tracked(session_id) {
            return Err(RequestError::NoTargetSession);
        }

        let context = self.collect(session_id).await?;
        let problem_id = context.problem_id.to_string();

        // One request per problem between cap check and commit; a concurrent
        // retry waits here and then sees the committed count.
        let gate = self.gate(&problem_id);
        let _guard = gate.lock().await;

        let count = self.ledger.count(&problem_id);
        if count >= HINT_CAP {
            let delivery = HintDelivery {
                hint_text: "".to_string(),
                level: count,
                ask_for_code: true,
            };
            self.present_hint(session_id, delivery).await;
            return Ok(HintOutcome::CapReached);
        }

        let level = count + 1;
        let (text, source) = self.fetch_hint(&context, level, now_ms).await;

        let delivery = HintDelivery {
            hint_text: text.to_string(),
            level,
            ask_for_code: false,
        };
        self.present_hint(session_id, delivery).await;

        let new_count = self.ledger.commit_increment(&problem_id).await;
        tracing::debug!(
            problem_id = problem_id,
            level = level,
            count = new_count,
            source = ?source,
            "Hint delivered"
        );

        return Ok(HintOutcome::Delivered {
            text,
            level,
            source,
        });
    }

    /// The follow-up offered once the cap is reached. Independent of the
    /// ledger; it never consumes a hint slot.
    pub async fn request_excerpt(
        &self,
        session_id: &str,
        now_ms: i64,
    ) -> Result<String, RequestError> {
        if !self.tracker.is_tracked(session_id) {
            return Err(RequestError::NoTargetSession);
        }

        let context = self.collect(session_id).await?;

        let mut text: Option<String> = None;
        if self.settings.allow_send_to_server()
            && !self.cache.rate_limited(&context.problem_id, now_ms)
        {
            self.cache.record_call(&context.problem_id, now_ms);
            match self
                .generator
                .generate_excerpt(GeneratePayload::for_excerpt(&context))
                .await
            {
                Ok(excerpt) => text = Some(excerpt),
                Err(err) => {
                    tracing::warn!(
                        error = ?err,
                        problem_id = context.problem_id,
                        "Excerpt generation failed, using the local snippet"
                    );
                }
            }
        }

        let text = text.unwrap_or_else(|| return Excerpts::local(&context.snippet));

        if let Err(err) = self.surface.present_excerpt(session_id, &text).await {
            tracing::warn!(error = ?err, session_id = session_id, "Failed to deliver excerpt");
        }

        return Ok(text);
    }

    /// Clears ledger and cache. Settings are untouched.
    pub async fn reset(&self) {
        self.ledger.reset().await;
        self.cache.reset().await;
    }

    /// Bounded context collection with one re-injection retry. The bound
    /// itself lives in the surface implementation.
    async fn collect(&self, session_id: &str) -> Result<ProblemContext, RequestError> {
        match self.surface.collect_context(session_id).await {
            Ok(Some(context)) => return Ok(context),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = ?err, session_id = session_id, "Context collection failed");
            }
        }

        if let Err(err) = self.surface.reinject(session_id).await {
            tracing::warn!(error = ?err, session_id = session_id, "Collector re-injection failed");
        }

        match self.surface.collect_context(session_id).await {
            Ok(Some(context)) => return Ok(context),
            _ => return Err(RequestError::ContextUnavailable),
        }
    }

    /// The fallback chain: generator, then cache, then local heuristics.
    /// Infallible by construction; the heuristic floor is never empty.
    async fn fetch_hint(
        &self,
        context: &ProblemContext,
        level: u32,
        now_ms: i64,
    ) -> (String, HintSource) {
        let problem_id = &context.problem_id;

        if !self.settings.allow_send_to_server() {
            return (
                Heuristics::hint(level, problem_id, &context.failure),
                HintSource::Heuristic,
            );
        }

        if let Some(text) = self.cache.fresh(problem_id, now_ms) {
            return (text, HintSource::Cache);
        }

        if self.cache.rate_limited(problem_id, now_ms) {
            return self.cached_or_heuristic(context, level);
        }

        self.cache.record_call(problem_id, now_ms);
        match self
            .generator
            .generate_hint(GeneratePayload::for_hint(context, level))
            .await
        {
            Ok(text) => {
                self.cache.put(problem_id, &text, now_ms).await;
                return (text, HintSource::Backend);
            }
            Err(err) => {
                tracing::warn!(
                    error = ?err,
                    problem_id = problem_id,
                    "Hint generation failed, falling back"
                );
                return self.cached_or_heuristic(context, level);
            }
        }
    }

    fn cached_or_heuristic(&self, context: &ProblemContext, level: u32) -> (String, HintSource) {
        if let Some(text) = self.cache.stale(&context.problem_id) {
            return (text, HintSource::Cache);
        }

        return (
            Heuristics::hint(level, &context.problem_id, &context.failure),
            HintSource::Heuristic,
        );
    }

    async fn present_hint(&self, session_id: &str, delivery: HintDelivery) {
        if let Err(err) = self.surface.present_hint(session_id, delivery).await {
            tracing::warn!(error = ?err, session_id = session_id, "Failed to deliver hint");
        }
    }

    fn gate(&self, problem_id: &str) -> Arc<Mutex<()>> {
        return self
            .gates
            .entry(problem_id.to_string())
            .or_insert_with(|| return Arc::new(Mutex::new(())))
            .clone();
    }
}
