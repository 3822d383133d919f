use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::alert::ChimeKind;
use crate::timer::Preset;

pub const DEFAULT_WS_PORT: u16 = 8765;

#[derive(Parser, Debug)]
#[command(name = "timer21", version, about = "Countdown timer with preset durations and an audible alert")]
pub struct Args {
    /// Serve the timer over WebSocket instead of the terminal
    #[arg(long)]
    pub daemon: bool,

    /// Initial duration, e.g. "5:00" or "5"
    #[arg(short, long)]
    pub preset: Option<Preset>,

    /// How the alert is played
    #[arg(long, value_enum)]
    pub chime: Option<ChimeKind>,

    /// WebSocket listen address for --daemon
    #[arg(long)]
    pub addr: Option<SocketAddr>,

    /// Session journal path
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Do not write a session journal
    #[arg(long, conflicts_with = "log")]
    pub no_log: bool,

    /// Settings file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print one motivational phrase and exit
    Phrase {
        /// Strip the decorative symbols
        #[arg(long)]
        plain: bool,
    },
    /// List the selectable durations and exit
    Presets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub preset: Preset,
    pub chime: ChimeKind,
    pub ws_addr: SocketAddr,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            chime: ChimeKind::default(),
            ws_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_WS_PORT)),
            log_file: Some(home_dir().join(".local/share/timer21/session.log")),
            verbose: false,
        }
    }
}

impl Settings {
    /// Defaults, then the settings file, then command-line flags.
    pub fn load(args: &Args) -> Result<Self> {
        let mut settings = match args.config {
            Some(ref path) => Self::from_file(path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_args(args);
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(preset) = args.preset {
            self.preset = preset;
        }
        if let Some(chime) = args.chime {
            self.chime = chime;
        }
        if let Some(addr) = args.addr {
            self.ws_addr = addr;
        }
        if let Some(ref log) = args.log {
            self.log_file = Some(log.clone());
        }
        if args.no_log {
            self.log_file = None;
        }
        if args.verbose {
            self.verbose = true;
        }
    }
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

pub fn default_config_path() -> PathBuf {
    home_dir().join(".config/timer21/config.json")
}
