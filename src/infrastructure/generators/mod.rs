pub mod noop;
pub mod remote;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::GeneratorBox;
use crate::domain::models::GeneratorName;

pub struct GeneratorManager {}

impl GeneratorManager {
    pub fn get(name: GeneratorName) -> Result<GeneratorBox> {
        if name == GeneratorName::Remote {
            return Ok(Box::<remote::Remote>::default());
        }

        if name == GeneratorName::Noop {
            return Ok(Box::<noop::NoopGenerator>::default());
        }

        bail!(format!("No generator implemented for {name}"))
    }
}
