use std::cmp;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StuckReason {
    Idle,
    Failure,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pass,
    Fail,
}

/// Per-session activity record. Lives in memory only and is rebuilt from
/// zero on restart; stuckness does not need to survive the process, hint
/// counts do.
#[derive(Clone, Debug, Default)]
pub struct SessionActivity {
    pub last_input_at: Option<i64>,
    pub last_submit_at: Option<i64>,
    pub recent_failures: Vec<i64>,
    pub stuck: Option<StuckReason>,
}

impl SessionActivity {
    /// The most recent of typing and submitting, used for idle detection.
    /// A session that has produced neither is never considered idle.
    pub fn last_activity_at(&self) -> Option<i64> {
        match (self.last_input_at, self.last_submit_at) {
            (Some(input), Some(submit)) => return Some(cmp::max(input, submit)),
            (Some(input), None) => return Some(input),
            (None, Some(submit)) => return Some(submit),
            (None, None) => return None,
        }
    }
}
