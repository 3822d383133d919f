use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::countdown::{Countdown, Snapshot, Tick};
use super::preset::{Preset, TICK_SECONDS};
use crate::alert::{self, Chime};
use crate::error::TimerError;
use crate::journal::Journal;

const TICK: Duration = Duration::from_secs(TICK_SECONDS);

/// User actions the timer loop understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Select(Preset),
    Status,
}

struct Request {
    command: Command,
    reply: oneshot::Sender<Result<Snapshot, TimerError>>,
}

/// Cheap, cloneable front-end side of the timer loop.
#[derive(Clone)]
pub struct TimerHandle {
    requests: mpsc::UnboundedSender<Request>,
    snapshots: watch::Receiver<Snapshot>,
}

impl TimerHandle {
    /// Apply a command and wait for the resulting state.
    pub async fn send(&self, command: Command) -> Result<Snapshot, TimerError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request { command, reply })
            .map_err(|_| TimerError::LoopClosed)?;
        response.await.map_err(|_| TimerError::LoopClosed)?
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    pub fn current(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }
}

/// Owns the countdown and its single pending one-second fire.
pub struct TimerLoop {
    countdown: Countdown,
    requests: mpsc::UnboundedReceiver<Request>,
    snapshots: watch::Sender<Snapshot>,
    chime: Arc<dyn Chime>,
    journal: Option<Journal>,
}

impl TimerLoop {
    pub fn new(
        preset: Preset,
        chime: Arc<dyn Chime>,
        journal: Option<Journal>,
    ) -> (Self, TimerHandle) {
        let countdown = Countdown::new(preset);
        let (requests_tx, requests) = mpsc::unbounded_channel();
        let (snapshots, snapshots_rx) = watch::channel(countdown.snapshot());
        let timer_loop = Self {
            countdown,
            requests,
            snapshots,
            chime,
            journal,
        };
        let handle = TimerHandle {
            requests: requests_tx,
            snapshots: snapshots_rx,
        };
        (timer_loop, handle)
    }

    pub fn spawn(
        preset: Preset,
        chime: Arc<dyn Chime>,
        journal: Option<Journal>,
    ) -> (TimerHandle, JoinHandle<()>) {
        let (timer_loop, handle) = Self::new(preset, chime, journal);
        (handle, tokio::spawn(timer_loop.run()))
    }

    /// Runs until every `TimerHandle` has been dropped.
    pub async fn run(mut self) {
        // A late fire pushes the schedule back instead of catching up.
        let mut ticks = interval(TICK);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                request = self.requests.recv() => {
                    let Some(Request { command, reply }) = request else {
                        break;
                    };
                    let was_running = self.countdown.is_running();
                    let result = self.apply(command);
                    if !was_running && self.countdown.is_running() {
                        ticks.reset();
                    }
                    self.publish();
                    let _ = reply.send(result);
                }
                _ = ticks.tick(), if self.countdown.is_running() => {
                    if self.countdown.tick() == Tick::Completed {
                        self.complete();
                    }
                    self.publish();
                }
            }
        }

        debug!("timer loop finished");
    }

    fn apply(&mut self, command: Command) -> Result<Snapshot, TimerError> {
        match command {
            Command::Start => {
                self.countdown.start()?;
                info!(preset = %self.countdown.preset(), "timer started");
                self.record(&format!("Started {}", self.countdown.preset()));
            }
            Command::Stop => {
                let at = self.countdown.snapshot().display;
                let was_running = self.countdown.is_running();
                self.countdown.stop();
                if was_running {
                    info!(at = %at, "timer stopped");
                    self.record(&format!("Stopped at {}", at));
                }
            }
            Command::Select(preset) => {
                self.countdown.select(preset);
                info!(preset = %preset, "duration selected");
                self.record(&format!("Selected {}", preset));
            }
            Command::Status => {}
        }
        Ok(self.countdown.snapshot())
    }

    fn complete(&self) {
        info!(preset = %self.countdown.preset(), "countdown complete, ringing");
        self.record(&format!("🔔 {} countdown complete", self.countdown.preset()));
        alert::ring(Arc::clone(&self.chime));
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.countdown.snapshot());
    }

    fn record(&self, event: &str) {
        if let Some(ref journal) = self.journal {
            journal.record(event);
        }
    }
}
