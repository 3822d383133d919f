use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimerError;

pub const TICK_SECONDS: u64 = 1; // One fire per second while running

/// Countdown durations offered by the picker, in minutes.
const PRESET_MINUTES: [u32; 6] = [1, 5, 10, 30, 45, 60];

pub const PRESETS: [Preset; 6] = [
    Preset(PRESET_MINUTES[0]),
    Preset(PRESET_MINUTES[1]),
    Preset(PRESET_MINUTES[2]),
    Preset(PRESET_MINUTES[3]),
    Preset(PRESET_MINUTES[4]),
    Preset(PRESET_MINUTES[5]),
];

/// One of the fixed countdown durations. Values outside the preset list
/// cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Preset(u32);

impl Preset {
    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn target_seconds(&self) -> u32 {
        self.0 * 60
    }

    pub fn label(&self) -> String {
        format!("{}:00", self.0)
    }
}

impl Default for Preset {
    fn default() -> Self {
        PRESETS[0]
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00", self.0)
    }
}

impl FromStr for Preset {
    type Err = TimerError;

    /// Accepts the picker label ("5:00") or the bare minute count ("5").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let minutes = match trimmed.split_once(':') {
            Some((minutes, "00")) => minutes,
            Some(_) => return Err(TimerError::UnknownPreset(trimmed.to_string())),
            None => trimmed,
        };

        minutes
            .parse::<u32>()
            .ok()
            .and_then(|m| PRESETS.iter().copied().find(|p| p.minutes() == m))
            .ok_or_else(|| TimerError::UnknownPreset(trimmed.to_string()))
    }
}

impl TryFrom<String> for Preset {
    type Error = TimerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Preset> for String {
    fn from(preset: Preset) -> Self {
        preset.label()
    }
}

pub fn labels() -> Vec<String> {
    PRESETS.iter().map(Preset::label).collect()
}
