#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::HintDelivery;
use crate::domain::models::ProblemContext;
use crate::domain::models::Surface;
use crate::domain::models::SurfaceName;

/// Surface for running the coordinator with no page attached. Context is
/// never available and deliveries have nowhere to go.
#[derive(Default)]
pub struct NoopSurface {}

#[async_trait]
impl Surface for NoopSurface {
    fn name(&self) -> SurfaceName {
        return SurfaceName::Noop;
    }

    #[allow(clippy::implicit_return)]
    async fn collect_context(&self, _session_id: &str) -> Result<Option<ProblemContext>> {
        return Ok(None);
    }

    #[allow(clippy::implicit_return)]
    async fn reinject(&self, _session_id: &str) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn present_hint(&self, _session_id: &str, _delivery: HintDelivery) -> Result<()> {
        return Err(anyhow!(
            "The noop surface has nowhere to present hints. Configure the 'stdio' surface instead"
        ));
    }

    #[allow(clippy::implicit_return)]
    async fn present_excerpt(&self, _session_id: &str, _text: &str) -> Result<()> {
        return Err(anyhow!(
            "The noop surface has nowhere to present excerpts. Configure the 'stdio' surface instead"
        ));
    }
}
