use std::error;
use std::fmt;

/// Escalation cap. A problem never yields more than this many hints; after
/// that the user is offered a code excerpt instead.
pub const HINT_CAP: u32 = 3;

/// Payload pushed to the presentation surface. Delivery is fire-and-forget:
/// a failed push is logged, never fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintDelivery {
    pub hint_text: String,
    pub level: u32,
    pub ask_for_code: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HintSource {
    Backend,
    Cache,
    Heuristic,
}

/// Terminal states of a hint request. Reaching the cap is a normal outcome,
/// not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    Delivered {
        text: String,
        level: u32,
        source: HintSource,
    },
    CapReached,
}

/// The only failures surfaced to the caller. Everything backend-related is
/// absorbed by the fallback chain instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RequestError {
    NoTargetSession,
    ContextUnavailable,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::NoTargetSession => return write!(f, "no_session"),
            RequestError::ContextUnavailable => return write!(f, "no_context"),
        }
    }
}

impl error::Error for RequestError {}
