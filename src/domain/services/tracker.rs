#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;

use dashmap::DashMap;

use crate::domain::models::SessionActivity;
use crate::domain::models::StuckReason;
use crate::domain::models::SubmissionStatus;

/// Watches per-session activity and decides when a user looks stuck, either
/// through a recent failed submission or through sustained inactivity. All
/// timestamps are unix milliseconds supplied by the caller.
pub struct ActivityTracker {
    sessions: DashMap<String, SessionActivity>,
    idle_threshold_ms: i64,
    failure_window_ms: i64,
}

impl ActivityTracker {
    pub fn new(idle_threshold_ms: i64, failure_window_ms: i64) -> ActivityTracker {
        return ActivityTracker {
            sessions: DashMap::new(),
            idle_threshold_ms,
            failure_window_ms,
        };
    }

    pub fn record_input(&self, session_id: &str, now_ms: i64) {
        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        session.last_input_at = Some(now_ms);

        // Typing again resolves an idle verdict, but not a failed one.
        if session.stuck == Some(StuckReason::Idle) {
            session.stuck = None;
        }
    }

    pub fn record_submit(&self, session_id: &str, now_ms: i64) {
        let mut session = self.sessions.entry(session_id.to_string()).or_default();
        session.last_submit_at = Some(now_ms);
    }

    /// Returns the stuck reason when this result newly marked the session
    /// stuck, so the caller can nudge the user exactly once per transition.
    pub fn record_result(
        &self,
        session_id: &str,
        status: SubmissionStatus,
        now_ms: i64,
    ) -> Option<StuckReason> {
        let mut session = self.sessions.entry(session_id.to_string()).or_default();

        if status == SubmissionStatus::Pass {
            session.recent_failures.clear();
            session.stuck = None;
            return None;
        }

        let window_start = now_ms - self.failure_window_ms;
        session.recent_failures.push(now_ms);
        session.recent_failures.retain(|ts| return *ts >= window_start);

        // A single in-window failure is enough.
        if !session.recent_failures.is_empty() && session.stuck != Some(StuckReason::Failure) {
            session.stuck = Some(StuckReason::Failure);
            return Some(StuckReason::Failure);
        }

        return None;
    }

    /// Periodic sweep. Returns the sessions newly marked idle. Sessions with
    /// no recorded activity are left alone.
    pub fn check_idle(&self, now_ms: i64) -> Vec<String> {
        let mut newly_idle: Vec<String> = vec![];

        for mut entry in self.sessions.iter_mut() {
            if entry.stuck.is_some() {
                continue;
            }

            let last_activity = match entry.last_activity_at() {
                Some(ts) => ts,
                None => continue,
            };

            if now_ms - last_activity > self.idle_threshold_ms {
                entry.stuck = Some(StuckReason::Idle);
                newly_idle.push(entry.key().to_string());
            }
        }

        return newly_idle;
    }

    pub fn remove(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn is_tracked(&self, session_id: &str) -> bool {
        return self.sessions.contains_key(session_id);
    }

    pub fn stuck_reason(&self, session_id: &str) -> Option<StuckReason> {
        return self
            .sessions
            .get(session_id)
            .and_then(|session| return session.stuck);
    }
}
