use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The requested duration is not one of the fixed presets.
    UnknownPreset(String),
    AlreadyRunning,
    NoTarget,
    /// The timer loop has shut down and can no longer take commands.
    LoopClosed,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::UnknownPreset(value) => write!(
                f,
                "unknown preset '{}', expected one of {}",
                value,
                crate::timer::preset::labels().join(", ")
            ),
            TimerError::AlreadyRunning => write!(f, "timer is already running"),
            TimerError::NoTarget => write!(f, "no duration selected"),
            TimerError::LoopClosed => write!(f, "timer loop is no longer running"),
        }
    }
}

impl std::error::Error for TimerError {}
