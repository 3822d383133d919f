pub mod countdown;
pub mod preset;
pub mod ticker;

pub use countdown::{Backdrop, Countdown, Snapshot, Tick};
pub use preset::{PRESETS, Preset};
pub use ticker::{Command, TimerHandle, TimerLoop};
