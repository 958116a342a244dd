#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::GeneratePayload;
use crate::domain::models::Generator;
use crate::domain::models::GeneratorName;
use crate::domain::models::ProbeStatus;

/// Generator used when remote generation is disabled outright. Every
/// request fails, which drops the orchestrator straight onto its local
/// fallback chain.
#[derive(Default)]
pub struct NoopGenerator {}

#[async_trait]
impl Generator for NoopGenerator {
    fn name(&self) -> GeneratorName {
        return GeneratorName::Noop;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn probe(&self) -> Result<ProbeStatus> {
        return Ok(ProbeStatus {
            status: "disabled".to_string(),
            provider: None,
            model: None,
        });
    }

    #[allow(clippy::implicit_return)]
    async fn generate_hint(&self, _payload: GeneratePayload) -> Result<String> {
        return Err(anyhow!(
            "The noop generator does not produce hints. Configure the 'remote' generator instead"
        ));
    }

    #[allow(clippy::implicit_return)]
    async fn generate_excerpt(&self, _payload: GeneratePayload) -> Result<String> {
        return Err(anyhow!(
            "The noop generator does not produce excerpts. Configure the 'remote' generator instead"
        ));
    }
}
