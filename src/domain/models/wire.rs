#[cfg(test)]
#[path = "wire_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::StuckReason;
use super::SubmissionStatus;

/// Messages arriving from the page side, one JSON object per line. Unknown
/// types are logged and skipped by the host.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    Input {
        session: String,
        #[serde(default)]
        ts: Option<i64>,
    },
    Submit {
        session: String,
        #[serde(default)]
        ts: Option<i64>,
    },
    #[serde(rename = "result")]
    SubmissionResult {
        session: String,
        status: SubmissionStatus,
        #[serde(default)]
        ts: Option<i64>,
    },
    Closed {
        session: String,
    },
    Hint {
        session: String,
    },
    Excerpt {
        session: String,
    },
    Context {
        request: String,
        #[serde(default)]
        problem_id: String,
        #[serde(default)]
        snippet: String,
        #[serde(default)]
        url: String,
        #[serde(default)]
        failure: String,
    },
    Settings {
        #[serde(default)]
        allow_send_to_server: Option<bool>,
        #[serde(default)]
        server_url: Option<String>,
    },
    Reset {},
}

/// Messages pushed to the page side.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    Collect {
        request: String,
        session: String,
    },
    Inject {
        session: String,
    },
    Delivery {
        session: String,
        hint: String,
        level: u32,
        ask_for_code: bool,
    },
    Excerpt {
        session: String,
        text: String,
    },
    Nudge {
        session: String,
        reason: StuckReason,
    },
    Failed {
        session: String,
        reason: String,
    },
}
