#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::GeneratePayload;
use crate::domain::models::GenerateResponse;
use crate::domain::models::Generator;
use crate::domain::models::GeneratorName;
use crate::domain::models::ProbeStatus;

/// HTTP client for the text-generation service. Every request carries a
/// hard timeout; callers treat any error here as a signal to fall back,
/// never as something to show the user.
pub struct Remote {
    url: String,
    generate_timeout: String,
    health_timeout: String,
}

impl Default for Remote {
    fn default() -> Remote {
        return Remote {
            url: Config::get(ConfigKey::ServerUrl),
            generate_timeout: Config::get(ConfigKey::GenerateTimeout),
            health_timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

impl Remote {
    fn health_url(&self) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.url)?;
        url.set_path("/health");
        return Ok(url);
    }

    fn generate_duration(&self) -> Result<Duration> {
        return Ok(Duration::from_millis(self.generate_timeout.parse::<u64>()?));
    }

    async fn generate(&self, payload: GeneratePayload) -> Result<GenerateResponse> {
        let res = reqwest::Client::new()
            .post(&self.url)
            .timeout(self.generate_duration()?)
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Generation request was rejected"
            );
            bail!("Generation request was rejected");
        }

        return Ok(res.json::<GenerateResponse>().await?);
    }
}

#[async_trait]
impl Generator for Remote {
    fn name(&self) -> GeneratorName {
        return GeneratorName::Remote;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Server URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(self.health_url()?)
            .timeout(Duration::from_millis(self.health_timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Generation service is not reachable");
            bail!("Generation service is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Generation service health check failed");
            bail!("Generation service health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn probe(&self) -> Result<ProbeStatus> {
        let res = reqwest::Client::new()
            .get(self.health_url()?)
            .timeout(Duration::from_millis(self.health_timeout.parse::<u64>()?))
            .send()
            .await?
            .json::<ProbeStatus>()
            .await?;

        return Ok(res);
    }

    #[allow(clippy::implicit_return)]
    async fn generate_hint(&self, payload: GeneratePayload) -> Result<String> {
        let res = self.generate(payload).await?;

        match res.hint {
            Some(hint) if !hint.trim().is_empty() => return Ok(hint),
            _ => bail!("Generation response carried no hint"),
        }
    }

    #[allow(clippy::implicit_return)]
    async fn generate_excerpt(&self, payload: GeneratePayload) -> Result<String> {
        let res = self.generate(payload).await?;

        match res.snippet {
            Some(snippet) if !snippet.trim().is_empty() => return Ok(snippet),
            _ => bail!("Generation response carried no snippet"),
        }
    }
}
