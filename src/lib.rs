//! Preset countdown timer with a repeating alert and a motivational
//! phrase table.

pub mod alert;
pub mod config;
pub mod error;
pub mod journal;
pub mod motivator;
pub mod terminal;
pub mod timer;
pub mod ws;

pub use error::TimerError;
