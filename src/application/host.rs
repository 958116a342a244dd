use std::path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::GeneratorName;
use crate::domain::models::Inbound;
use crate::domain::models::Outbound;
use crate::domain::models::ProblemContext;
use crate::domain::models::StuckReason;
use crate::domain::models::SurfaceName;
use crate::domain::services::ActivityTracker;
use crate::domain::services::HintCache;
use crate::domain::services::HintLedger;
use crate::domain::services::Orchestrator;
use crate::domain::services::SettingsStore;
use crate::infrastructure::generators::GeneratorManager;
use crate::infrastructure::surfaces::PendingContexts;
use crate::infrastructure::surfaces::SurfaceManager;

fn now_ms() -> i64 {
    return Utc::now().timestamp_millis();
}

/// The long-running coordinator loop. Speaks the line-delimited JSON wire
/// protocol over stdio: activity events and requests come in, context
/// requests and deliveries go out. Diagnostics go to the log file, never to
/// stdout, which belongs to the protocol.
pub struct Host {
    tracker: Arc<ActivityTracker>,
    settings: Arc<SettingsStore>,
    orchestrator: Arc<Orchestrator>,
    pending: Arc<PendingContexts>,
    outbound: mpsc::UnboundedSender<Outbound>,
}

impl Host {
    pub async fn new(outbound: mpsc::UnboundedSender<Outbound>) -> Result<Host> {
        let data_dir = path::PathBuf::from(Config::get(ConfigKey::DataDir));

        let tracker = Arc::new(ActivityTracker::new(
            Config::get_seconds_as_ms(ConfigKey::IdleThreshold),
            Config::get_seconds_as_ms(ConfigKey::FailureWindow),
        ));
        let settings = Arc::new(SettingsStore::from_config());
        let pending = Arc::new(PendingContexts::default());

        let ledger = HintLedger::load(&data_dir).await;
        let cache = HintCache::load(
            &data_dir,
            Config::get_seconds_as_ms(ConfigKey::CacheTtl),
            Config::get_seconds_as_ms(ConfigKey::RateLimitInterval),
        )
        .await;

        let generator =
            GeneratorManager::get(GeneratorName::parse(Config::get(ConfigKey::Generator)).unwrap())?;
        let surface = SurfaceManager::get(
            SurfaceName::parse(Config::get(ConfigKey::Surface)).unwrap(),
            outbound.clone(),
            pending.clone(),
        )?;

        let orchestrator = Arc::new(Orchestrator::new(
            tracker.clone(),
            settings.clone(),
            ledger,
            cache,
            generator,
            surface,
        ));

        tracing::info!(
            allow_send_to_server = settings.allow_send_to_server(),
            server_url = settings.server_url(),
            "Host ready"
        );

        return Ok(Host {
            tracker,
            settings,
            orchestrator,
            pending,
            outbound,
        });
    }

    fn handle_line(&self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        match serde_json::from_str::<Inbound>(line) {
            Ok(message) => self.handle_message(message),
            Err(err) => {
                tracing::warn!(error = ?err, "Skipping an unparseable message");
            }
        }
    }

    fn handle_message(&self, message: Inbound) {
        let now = now_ms();

        match message {
            Inbound::Input { session, ts } => {
                self.tracker.record_input(&session, ts.unwrap_or(now));
            }
            Inbound::Submit { session, ts } => {
                self.tracker.record_submit(&session, ts.unwrap_or(now));
            }
            Inbound::SubmissionResult {
                session,
                status,
                ts,
            } => {
                if let Some(reason) =
                    self.tracker
                        .record_result(&session, status, ts.unwrap_or(now))
                {
                    self.nudge(&session, reason);
                }
            }
            Inbound::Closed { session } => {
                self.tracker.remove(&session);
            }
            Inbound::Hint { session } => {
                let orchestrator = self.orchestrator.clone();
                let outbound = self.outbound.clone();
                tokio::spawn(async move {
                    if let Err(err) = orchestrator.request_hint(&session, now_ms()).await {
                        let _ = outbound.send(Outbound::Failed {
                            session,
                            reason: err.to_string(),
                        });
                    }
                });
            }
            Inbound::Excerpt { session } => {
                let orchestrator = self.orchestrator.clone();
                let outbound = self.outbound.clone();
                tokio::spawn(async move {
                    if let Err(err) = orchestrator.request_excerpt(&session, now_ms()).await {
                        let _ = outbound.send(Outbound::Failed {
                            session,
                            reason: err.to_string(),
                        });
                    }
                });
            }
            Inbound::Context {
                request,
                problem_id,
                snippet,
                url,
                failure,
            } => {
                let context = ProblemContext::new(&problem_id, &snippet, &url, &failure);
                if !self.pending.resolve(&request, context) {
                    tracing::debug!(request = request, "Discarded a late context response");
                }
            }
            Inbound::Settings {
                allow_send_to_server,
                server_url,
            } => {
                self.settings
                    .apply(allow_send_to_server, server_url.clone());

                tokio::spawn(async move {
                    if let Some(allow) = allow_send_to_server {
                        if let Err(err) =
                            Config::persist_set(ConfigKey::AllowSendToServer, &allow.to_string())
                                .await
                        {
                            tracing::warn!(error = ?err, "Failed to persist consent setting");
                        }
                    }
                    if let Some(url) = server_url {
                        if let Err(err) = Config::persist_set(ConfigKey::ServerUrl, &url).await {
                            tracing::warn!(error = ?err, "Failed to persist server url");
                        }
                    }
                });
            }
            Inbound::Reset {} => {
                let orchestrator = self.orchestrator.clone();
                tokio::spawn(async move {
                    orchestrator.reset().await;
                });
            }
        }
    }

    fn check_idle(&self) {
        for session in self.tracker.check_idle(now_ms()) {
            self.nudge(&session, StuckReason::Idle);
        }
    }

    fn nudge(&self, session_id: &str, reason: StuckReason) {
        if self
            .outbound
            .send(Outbound::Nudge {
                session: session_id.to_string(),
                reason,
            })
            .is_err()
        {
            tracing::warn!(session_id = session_id, "Failed to push a nudge");
        }
    }
}

async fn write_outbound(mut rx: mpsc::UnboundedReceiver<Outbound>) {
    let mut stdout = tokio::io::stdout();

    while let Some(message) = rx.recv().await {
        let line = match serde_json::to_string(&message) {
            Ok(line) => line,
            Err(err) => {
                tracing::error!(error = ?err, "Failed to serialize an outbound message");
                continue;
            }
        };

        if stdout.write_all(line.as_bytes()).await.is_err() {
            break;
        }
        if stdout.write_all(b"\n").await.is_err() {
            break;
        }
        let _ = stdout.flush().await;
    }
}

pub async fn start() -> Result<()> {
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel::<Outbound>();
    let host = Host::new(outbound_tx).await?;

    let writer = tokio::spawn(write_outbound(outbound_rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tick = time::interval(Duration::from_secs(
        Config::get(ConfigKey::IdleTick).parse::<u64>()?,
    ));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => host.handle_line(&line),
                    Ok(None) => break,
                    Err(err) => {
                        tracing::error!(error = ?err, "Failed reading the inbound stream");
                        break;
                    }
                }
            }
            _ = tick.tick() => host.check_idle(),
        }
    }

    // The peer hung up; nothing is left to deliver to.
    writer.abort();
    return Ok(());
}
