use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::HintDelivery;
use super::ProblemContext;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SurfaceName {
    Stdio,
    Noop,
}

impl SurfaceName {
    pub fn parse(text: String) -> Option<SurfaceName> {
        return SurfaceName::iter().find(|e| return e.to_string() == text);
    }
}

/// The page side of the coordinator: supplies problem context on demand and
/// renders deliveries. May be transiently unavailable.
#[async_trait]
pub trait Surface {
    fn name(&self) -> SurfaceName;

    /// Asks the page for the current problem context. Implementations bound
    /// the wait themselves and return None when the page does not answer in
    /// time.
    async fn collect_context(&self, session_id: &str) -> Result<Option<ProblemContext>>;

    /// Asks the page to re-inject its collector before the caller retries a
    /// collect.
    async fn reinject(&self, session_id: &str) -> Result<()>;

    /// Pushes a hint to the page. Fire-and-forget.
    async fn present_hint(&self, session_id: &str, delivery: HintDelivery) -> Result<()>;

    /// Pushes a code excerpt to the page. Fire-and-forget.
    async fn present_excerpt(&self, session_id: &str, text: &str) -> Result<()>;
}

pub type SurfaceBox = Box<dyn Surface + Send + Sync>;
