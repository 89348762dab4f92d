pub mod clock;
pub mod engine;

pub use clock::{ManualClock, ReplayClock, SystemClock};
pub use engine::{ReplayConfig, ReplayEngine, ReplayState, ReplayStatus, ReplayTick};
