mod activity;
mod context;
mod delivery;
mod generator;
mod surface;
mod wire;

pub use activity::*;
pub use context::*;
pub use delivery::*;
pub use generator::*;
pub use surface::*;
pub use wire::*;
