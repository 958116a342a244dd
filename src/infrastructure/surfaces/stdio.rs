#[cfg(test)]
#[path = "stdio_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time;
use uuid::Uuid;

use super::pending::PendingContexts;
use crate::domain::models::HintDelivery;
use crate::domain::models::Outbound;
use crate::domain::models::ProblemContext;
use crate::domain::models::Surface;
use crate::domain::models::SurfaceName;

/// Surface backed by the host's stdio message stream. Collecting context is
/// a request/response round-trip against the page, bounded by the collect
/// timeout; deliveries are one-way messages.
pub struct StdioSurface {
    outbound: mpsc::UnboundedSender<Outbound>,
    pending: Arc<PendingContexts>,
    collect_timeout: Duration,
}

impl StdioSurface {
    pub fn new(
        outbound: mpsc::UnboundedSender<Outbound>,
        pending: Arc<PendingContexts>,
        collect_timeout: Duration,
    ) -> StdioSurface {
        return StdioSurface {
            outbound,
            pending,
            collect_timeout,
        };
    }
}

#[async_trait]
impl Surface for StdioSurface {
    fn name(&self) -> SurfaceName {
        return SurfaceName::Stdio;
    }

    #[allow(clippy::implicit_return)]
    async fn collect_context(&self, session_id: &str) -> Result<Option<ProblemContext>> {
        let request_id = Uuid::new_v4().to_string();
        let rx = self.pending.register(&request_id);

        self.outbound.send(Outbound::Collect {
            request: request_id.to_string(),
            session: session_id.to_string(),
        })?;

        match time::timeout(self.collect_timeout, rx).await {
            Ok(Ok(context)) => return Ok(Some(context)),
            _ => {
                self.pending.discard(&request_id);
                return Ok(None);
            }
        }
    }

    #[allow(clippy::implicit_return)]
    async fn reinject(&self, session_id: &str) -> Result<()> {
        self.outbound.send(Outbound::Inject {
            session: session_id.to_string(),
        })?;
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn present_hint(&self, session_id: &str, delivery: HintDelivery) -> Result<()> {
        self.outbound.send(Outbound::Delivery {
            session: session_id.to_string(),
            hint: delivery.hint_text,
            level: delivery.level,
            ask_for_code: delivery.ask_for_code,
        })?;
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn present_excerpt(&self, session_id: &str, text: &str) -> Result<()> {
        self.outbound.send(Outbound::Excerpt {
            session: session_id.to_string(),
            text: text.to_string(),
        })?;
        return Ok(());
    }
}
