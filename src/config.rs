use crate::events::AppEvent;
use crate::gui::ring::{AnimationPolicy, DEFAULT_ARC_WIDTH};
use derive_more::{Deref, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::{Srgb, Srgba};
use serde::Deserialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use async_channel::Sender;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Opaque color written as `#rrggbb` (or `rrggbb`) in the config file.
#[derive(
    Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay, Deref, From, Into,
)]
pub struct RingColor(Srgba<f64>);

impl RingColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgba::<u8>::new(red, green, blue, u8::MAX).into_format())
    }
}

impl FromStr for RingColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rgb = Srgb::<u8>::from_str(s.trim())?;
        Ok(Self::new(rgb.red, rgb.green, rgb.blue))
    }
}

impl fmt::Display for RingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rgb: Srgba<u8> = self.0.into_format();
        write!(f, "#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
    }
}

fn default_background_color() -> RingColor {
    RingColor::new(0xaa, 0xaa, 0xaa)
}

fn default_foreground_color() -> RingColor {
    RingColor::new(0x00, 0xff, 0x00)
}

fn default_label_color() -> RingColor {
    RingColor::new(0x00, 0x00, 0x00)
}

fn default_arc_width() -> f64 {
    DEFAULT_ARC_WIDTH
}

/// Initial state of the ring. `progress` and `arc_start_location` are taken as raw integers and
/// normalized by the ring itself, the same way any other host assignment is.
#[derive(Debug, Clone, Deserialize)]
pub struct RingConfig {
    #[serde(default = "default_background_color")]
    pub background_color: RingColor,
    #[serde(default = "default_foreground_color")]
    pub foreground_color: RingColor,
    #[serde(default = "default_label_color")]
    pub label_color: RingColor,
    #[serde(default = "default_arc_width")]
    pub foreground_arc_width: f64,
    #[serde(default = "default_arc_width")]
    pub background_arc_width: f64,
    #[serde(default)]
    pub arc_margin: f64,
    #[serde(default)]
    pub animate_progress: bool,
    #[serde(default)]
    pub display_progress_textually: bool,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub arc_start_location: i64,
    #[serde(default)]
    pub animation_policy: AnimationPolicy,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            foreground_color: default_foreground_color(),
            label_color: default_label_color(),
            foreground_arc_width: default_arc_width(),
            background_arc_width: default_arc_width(),
            arc_margin: 0.0,
            animate_progress: false,
            display_progress_textually: false,
            progress: 0,
            arc_start_location: 0,
            animation_policy: AnimationPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "WindowConfig::default_size")]
    pub width: i32,
    #[serde(default = "WindowConfig::default_size")]
    pub height: i32,
    #[serde(default = "WindowConfig::default_step")]
    pub progress_step: i64,
}

impl WindowConfig {
    fn default_size() -> i32 {
        240
    }

    fn default_step() -> i64 {
        5
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: Self::default_size(),
            height: Self::default_size(),
            progress_step: Self::default_step(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ring: RingConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "progress-ring", "progress-ring")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("PROGRESS_RING")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

type WatchEvent = notify::Result<notify::Event>;

fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Watches the directory rather than the file so that editors replacing the file on save are
/// still seen. Events are bridged from notify's callback thread into an async channel.
fn watch_config_dir(
    config_path: &Path,
) -> Result<(RecommendedWatcher, async_channel::Receiver<WatchEvent>), ConfigError> {
    let config_dir = config_path
        .parent()
        .ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;

    Ok((watcher, bridge_rx))
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };

    // the watcher stops when dropped, keep it for the whole loop
    let (_watcher, events) = match watch_config_dir(&config_path) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch {}: {}", config_path.display(), e);
            return;
        }
    };
    log::info!("Watching {} for changes", config_path.display());

    while let Ok(res) = events.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
