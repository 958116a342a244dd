pub mod noop;
pub mod pending;
pub mod stdio;

use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

pub use pending::PendingContexts;
pub use stdio::StdioSurface;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Outbound;
use crate::domain::models::SurfaceBox;
use crate::domain::models::SurfaceName;

pub struct SurfaceManager {}

impl SurfaceManager {
    pub fn get(
        name: SurfaceName,
        outbound: mpsc::UnboundedSender<Outbound>,
        pending: Arc<PendingContexts>,
    ) -> Result<SurfaceBox> {
        if name == SurfaceName::Stdio {
            let collect_timeout =
                Duration::from_millis(Config::get(ConfigKey::CollectTimeout).parse::<u64>()?);
            return Ok(Box::new(StdioSurface::new(
                outbound,
                pending,
                collect_timeout,
            )));
        }

        if name == SurfaceName::Noop {
            return Ok(Box::<noop::NoopSurface>::default());
        }

        bail!(format!("No surface implemented for {name}"))
    }
}
