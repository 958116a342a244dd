mod excerpt;
mod heuristics;
mod hint_cache;
mod ledger;
mod orchestrator;
mod settings;
mod tracker;

pub use excerpt::*;
pub use heuristics::*;
pub use hint_cache::*;
pub use ledger::*;
pub use orchestrator::*;
pub use settings::*;
pub use tracker::*;
