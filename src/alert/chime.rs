use anyhow::Result;
use notify_rust::Notification;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Arc;

/// Something that can play a short notification sound right now.
pub trait Chime: Send + Sync {
    fn name(&self) -> &str;
    fn play(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChimeKind {
    #[default]
    Notification,
    Bell,
    #[cfg(feature = "tone")]
    Tone,
    Silent,
}

impl ChimeKind {
    pub fn build(self) -> Result<Arc<dyn Chime>> {
        let chime: Arc<dyn Chime> = match self {
            ChimeKind::Notification => Arc::new(NotificationChime),
            ChimeKind::Bell => Arc::new(BellChime),
            #[cfg(feature = "tone")]
            ChimeKind::Tone => Arc::new(tone::ToneChime::spawn()?),
            ChimeKind::Silent => Arc::new(SilentChime),
        };
        Ok(chime)
    }
}

/// Desktop notification carrying the session's sound hint.
pub struct NotificationChime;

impl Chime for NotificationChime {
    fn name(&self) -> &str {
        "notification"
    }

    fn play(&self) -> Result<()> {
        Notification::new()
            .summary("Timer21")
            .body("Time's up!")
            .sound_name("message-new-instant")
            .timeout(5000)
            .show()?;
        Ok(())
    }
}

/// Terminal bell on stdout.
pub struct BellChime;

impl Chime for BellChime {
    fn name(&self) -> &str {
        "bell"
    }

    fn play(&self) -> Result<()> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

pub struct SilentChime;

impl Chime for SilentChime {
    fn name(&self) -> &str {
        "silent"
    }

    fn play(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(feature = "tone")]
mod tone {
    use anyhow::{Context, Result, anyhow};
    use rodio::{OutputStream, Sink, Source, source::SineWave};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tracing::warn;

    use super::Chime;

    /// The audio output stream is not `Send`, so it lives on its own thread
    /// and plays are requested over a channel.
    pub struct ToneChime {
        requests: mpsc::Sender<()>,
    }

    impl ToneChime {
        pub fn spawn() -> Result<Self> {
            let (requests, inbox) = mpsc::channel::<()>();
            thread::Builder::new()
                .name("timer21-tone".to_string())
                .spawn(move || {
                    let (_stream, handle) = match OutputStream::try_default() {
                        Ok(output) => output,
                        Err(e) => {
                            warn!("audio output unavailable: {}", e);
                            return;
                        }
                    };
                    while inbox.recv().is_ok() {
                        match Sink::try_new(&handle) {
                            Ok(sink) => {
                                let source = SineWave::new(880.0)
                                    .take_duration(Duration::from_millis(400))
                                    .amplify(0.2);
                                sink.append(source);
                                sink.detach();
                            }
                            Err(e) => warn!("failed to create tone sink: {}", e),
                        }
                    }
                })
                .context("Failed to start tone thread")?;
            Ok(Self { requests })
        }
    }

    impl Chime for ToneChime {
        fn name(&self) -> &str {
            "tone"
        }

        fn play(&self) -> Result<()> {
            self.requests
                .send(())
                .map_err(|_| anyhow!("tone thread has exited"))
        }
    }
}
