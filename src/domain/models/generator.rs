use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::ProblemContext;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GeneratorName {
    Remote,
    Noop,
}

impl GeneratorName {
    pub fn parse(text: String) -> Option<GeneratorName> {
        return GeneratorName::iter().find(|e| return e.to_string() == text);
    }
}

/// Request body for the generation service.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePayload {
    pub problem_id: String,
    pub snippet: String,
    pub url: String,
    pub failure: String,
    pub hint_level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
}

impl GeneratePayload {
    pub fn for_hint(context: &ProblemContext, level: u32) -> GeneratePayload {
        return GeneratePayload {
            problem_id: context.problem_id.to_string(),
            snippet: context.snippet.to_string(),
            url: context.url.to_string(),
            failure: context.failure.to_string(),
            hint_level: level,
            request: None,
        };
    }

    pub fn for_excerpt(context: &ProblemContext) -> GeneratePayload {
        return GeneratePayload {
            problem_id: context.problem_id.to_string(),
            snippet: context.snippet.to_string(),
            url: context.url.to_string(),
            failure: context.failure.to_string(),
            hint_level: 1,
            request: Some("snippet".to_string()),
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// Response of the generation service's liveness endpoint. Diagnostics
/// only, the request path never reads it.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[async_trait]
pub trait Generator {
    fn name(&self) -> GeneratorName;

    /// Used by diagnostics to verify the generation service is reachable.
    async fn health_check(&self) -> Result<()>;

    /// Reports which provider and model the generation service is
    /// configured with.
    async fn probe(&self) -> Result<ProbeStatus>;

    /// Requests a single hint for the given payload. Any failure here is
    /// absorbed by the caller's fallback chain, never shown to the user.
    async fn generate_hint(&self, payload: GeneratePayload) -> Result<String>;

    /// Requests a short code excerpt with the same failure discipline as
    /// hints.
    async fn generate_excerpt(&self, payload: GeneratePayload) -> Result<String>;
}

pub type GeneratorBox = Box<dyn Generator + Send + Sync>;
