use serde::Serialize;

use super::preset::Preset;
use crate::error::TimerError;

/// Seconds at each end of the countdown that get their own backdrop.
const EDGE_SECONDS: u32 = 5;

/// Screen colouring that follows the countdown position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backdrop {
    Fresh,
    Steady,
    Closing,
}

impl Backdrop {
    pub fn for_position(elapsed_seconds: u32, target_seconds: u32) -> Self {
        if elapsed_seconds <= EDGE_SECONDS {
            Backdrop::Fresh
        } else if elapsed_seconds >= target_seconds.saturating_sub(EDGE_SECONDS) {
            Backdrop::Closing
        } else {
            Backdrop::Steady
        }
    }

    /// ANSI background escape for the terminal front end.
    pub fn ansi(&self) -> &str {
        match self {
            Backdrop::Fresh => "\x1b[42;97m",
            Backdrop::Steady => "\x1b[40;97m",
            Backdrop::Closing => "\x1b[100;97m",
        }
    }
}

/// Outcome of a single one-second fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The timer was not running; nothing changed.
    Idle,
    Advanced,
    /// The target was reached and the counter wrapped back to zero.
    Completed,
}

/// Renderable view of the timer, published after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub display: String,
    pub elapsed_seconds: u32,
    pub target_seconds: u32,
    pub preset: Preset,
    pub running: bool,
    pub can_start: bool,
    pub can_stop: bool,
    pub backdrop: Backdrop,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    preset: Preset,
    target_seconds: u32,
    elapsed_seconds: u32,
    running: bool,
}

impl Countdown {
    pub fn new(preset: Preset) -> Self {
        Self {
            preset,
            target_seconds: preset.target_seconds(),
            elapsed_seconds: 0,
            running: false,
        }
    }

    /// Short targets keep the tick-level tests readable.
    #[cfg(test)]
    pub(crate) fn with_target_seconds(target_seconds: u32) -> Self {
        Self {
            preset: Preset::default(),
            target_seconds,
            elapsed_seconds: 0,
            running: false,
        }
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn target_seconds(&self) -> u32 {
        self.target_seconds
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn can_start(&self) -> bool {
        !self.running && self.target_seconds > 0
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.running {
            return Err(TimerError::AlreadyRunning);
        }
        if self.target_seconds == 0 {
            return Err(TimerError::NoTarget);
        }
        self.running = true;
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_seconds = 0;
    }

    /// Picking a duration always goes through a full stop first.
    pub fn select(&mut self, preset: Preset) {
        self.stop();
        self.preset = preset;
        self.target_seconds = preset.target_seconds();
    }

    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }

        if self.elapsed_seconds + 1 >= self.target_seconds {
            self.elapsed_seconds = 0;
            Tick::Completed
        } else {
            self.elapsed_seconds += 1;
            Tick::Advanced
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: format_display(self.elapsed_seconds),
            elapsed_seconds: self.elapsed_seconds,
            target_seconds: self.target_seconds,
            preset: self.preset,
            running: self.running,
            can_start: self.can_start(),
            can_stop: self.running,
            backdrop: Backdrop::for_position(self.elapsed_seconds, self.target_seconds),
        }
    }
}

/// Format seconds as "M:SS"; minutes are not padded.
pub fn format_display(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::preset::PRESETS;

    fn run(countdown: &mut Countdown, ticks: u32) -> usize {
        (0..ticks)
            .filter(|_| countdown.tick() == Tick::Completed)
            .count()
    }

    #[test]
    fn test_five_second_wrap() {
        let mut cd = Countdown::with_target_seconds(5);
        cd.start().unwrap();

        assert_eq!(run(&mut cd, 4), 0);
        assert_eq!(cd.snapshot().display, "0:04");

        assert_eq!(cd.tick(), Tick::Completed);
        assert_eq!(cd.elapsed_seconds(), 0);
        assert_eq!(cd.snapshot().display, "0:00");
        assert!(cd.is_running());

        assert_eq!(cd.tick(), Tick::Advanced);
        assert_eq!(cd.snapshot().display, "0:01");
    }

    #[test]
    fn test_every_preset_completes_once_per_period() {
        for preset in PRESETS {
            let mut cd = Countdown::new(preset);
            cd.start().unwrap();
            let target = preset.target_seconds();

            assert_eq!(run(&mut cd, target), 1, "preset {preset}");
            assert_eq!(cd.elapsed_seconds(), 0);
            assert_eq!(run(&mut cd, target * 2), 2, "preset {preset}");
        }
    }

    #[test]
    fn test_stop_always_resets() {
        let mut cd = Countdown::new(PRESETS[0]);
        cd.stop();
        assert_eq!((cd.elapsed_seconds(), cd.is_running()), (0, false));

        cd.start().unwrap();
        run(&mut cd, 17);
        cd.stop();
        assert_eq!((cd.elapsed_seconds(), cd.is_running()), (0, false));
        assert_eq!(cd.tick(), Tick::Idle);
        assert_eq!(cd.elapsed_seconds(), 0);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut cd = Countdown::new(PRESETS[1]);
        cd.start().unwrap();
        run(&mut cd, 3);
        assert_eq!(cd.start(), Err(TimerError::AlreadyRunning));
        assert_eq!(cd.elapsed_seconds(), 3);
    }

    #[test]
    fn test_zero_target_cannot_start() {
        let mut cd = Countdown::with_target_seconds(0);
        assert!(!cd.can_start());
        assert_eq!(cd.start(), Err(TimerError::NoTarget));
    }

    #[test]
    fn test_select_while_running_matches_stop_then_select() {
        let mut selected = Countdown::new(PRESETS[0]);
        selected.start().unwrap();
        run(&mut selected, 12);
        selected.select(PRESETS[4]);

        let mut stopped = Countdown::new(PRESETS[0]);
        stopped.start().unwrap();
        run(&mut stopped, 12);
        stopped.stop();
        stopped.select(PRESETS[4]);

        assert_eq!(selected.snapshot(), stopped.snapshot());
        assert!(!selected.is_running());
        assert_eq!(selected.target_seconds(), 2700);
    }

    #[test]
    fn test_snapshot_controls() {
        let mut cd = Countdown::new(PRESETS[0]);
        let idle = cd.snapshot();
        assert!(idle.can_start && !idle.can_stop);

        cd.start().unwrap();
        let running = cd.snapshot();
        assert!(!running.can_start && running.can_stop);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(0), "0:00");
        assert_eq!(format_display(7), "0:07");
        assert_eq!(format_display(725), "12:05");
        assert_eq!(format_display(3599), "59:59");
    }

    #[test]
    fn test_backdrop_thresholds() {
        assert_eq!(Backdrop::for_position(0, 60), Backdrop::Fresh);
        assert_eq!(Backdrop::for_position(5, 60), Backdrop::Fresh);
        assert_eq!(Backdrop::for_position(6, 60), Backdrop::Steady);
        assert_eq!(Backdrop::for_position(54, 60), Backdrop::Steady);
        assert_eq!(Backdrop::for_position(55, 60), Backdrop::Closing);
        // Short targets overlap; the opening colour wins.
        assert_eq!(Backdrop::for_position(4, 8), Backdrop::Fresh);
    }
}
