use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use super::chime::Chime;

pub const ALERT_PLAYS: u32 = 5;
pub const ALERT_SPACING: Duration = Duration::from_secs(2);

/// Play the chime now and then every `ALERT_SPACING` until `ALERT_PLAYS`
/// plays have been issued. The sequence runs detached; stopping the timer
/// does not cut it short.
pub fn ring(chime: Arc<dyn Chime>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let started = Instant::now();
        for play in 0..ALERT_PLAYS {
            if play > 0 {
                sleep_until(started + ALERT_SPACING * play).await;
            }
            debug!(play = play + 1, chime = chime.name(), "alert play");
            if let Err(e) = chime.play() {
                warn!(chime = chime.name(), "chime failed: {:#}", e);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingChime {
        plays: Mutex<Vec<Instant>>,
    }

    impl Chime for RecordingChime {
        fn name(&self) -> &str {
            "recording"
        }

        fn play(&self) -> anyhow::Result<()> {
            self.plays.lock().unwrap().push(Instant::now());
            Ok(())
        }
    }

    struct BrokenChime {
        attempts: Mutex<u32>,
    }

    impl Chime for BrokenChime {
        fn name(&self) -> &str {
            "broken"
        }

        fn play(&self) -> anyhow::Result<()> {
            *self.attempts.lock().unwrap() += 1;
            Err(anyhow!("no audio device"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_five_plays_two_seconds_apart() {
        let chime = Arc::new(RecordingChime::default());
        let start = Instant::now();

        ring(chime.clone()).await.unwrap();

        let offsets: Vec<u64> = chime
            .plays
            .lock()
            .unwrap()
            .iter()
            .map(|at| at.duration_since(start).as_secs())
            .collect();
        assert_eq!(offsets, vec![0, 2, 4, 6, 8]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_play_is_immediate() {
        let chime = Arc::new(RecordingChime::default());
        let _sequence = ring(chime.clone());

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(chime.plays.lock().unwrap().len(), 1);

        tokio::time::sleep(ALERT_SPACING).await;
        assert_eq!(chime.plays.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_end_the_sequence() {
        let chime = Arc::new(BrokenChime {
            attempts: Mutex::new(0),
        });

        ring(chime.clone()).await.unwrap();

        assert_eq!(*chime.attempts.lock().unwrap(), ALERT_PLAYS);
    }
}
