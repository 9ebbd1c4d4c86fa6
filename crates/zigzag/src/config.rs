use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const DEFAULT_CSV_PATH: &str = "timeline.csv";
const DEFAULT_IMAGES_DIR: &str = "images";
const DEFAULT_TITLE_PATH: &str = "title.txt";
const DEFAULT_DESCRIPTION_PATH: &str = "description.txt";
const DEFAULT_CONNECTOR_HEIGHT: f32 = 100.0;
const DEFAULT_RESOLVE_TIMEOUT_MS: u64 = 5_000;

/// How aggressively the timeline is thinned out. 1 is sparse, 5 shows all.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Density(u8);

impl Density {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Out of range values are clamped
    pub fn new(level: u8) -> Self {
        Density(level.clamp(Self::MIN, Self::MAX))
    }

    pub fn all() -> Self {
        Density(Self::MAX)
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Sampling step, or `None` when every event is kept
    pub fn step(&self) -> Option<usize> {
        if self.0 >= Self::MAX {
            None
        } else {
            Some((Self::MAX + 1 - self.0) as usize)
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self.0 {
            1 => Some("Few"),
            3 => Some("Medium"),
            5 => Some("All"),
            _ => None,
        }
    }
}

impl Default for Density {
    fn default() -> Self {
        Density::all()
    }
}

impl From<u8> for Density {
    fn from(level: u8) -> Self {
        Density::new(level)
    }
}

impl From<Density> for u8 {
    fn from(density: Density) -> Self {
        density.0
    }
}

/// Number of events per timeline row
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct ItemsPerRow(u8);

impl ItemsPerRow {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 6;

    /// Out of range values are clamped
    pub fn new(n: u8) -> Self {
        ItemsPerRow(n.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

impl Default for ItemsPerRow {
    fn default() -> Self {
        ItemsPerRow(Self::MAX)
    }
}

impl From<u8> for ItemsPerRow {
    fn from(n: u8) -> Self {
        ItemsPerRow::new(n)
    }
}

impl From<ItemsPerRow> for u8 {
    fn from(n: ItemsPerRow) -> Self {
        n.0
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from(DEFAULT_CSV_PATH)
}

fn default_images_dir() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGES_DIR)
}

fn default_title_path() -> PathBuf {
    PathBuf::from(DEFAULT_TITLE_PATH)
}

fn default_description_path() -> PathBuf {
    PathBuf::from(DEFAULT_DESCRIPTION_PATH)
}

fn default_connector_height() -> f32 {
    DEFAULT_CONNECTOR_HEIGHT
}

fn default_resolve_timeout_ms() -> u64 {
    DEFAULT_RESOLVE_TIMEOUT_MS
}

fn default_background_images() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
    #[serde(default = "default_title_path")]
    pub title_path: PathBuf,
    #[serde(default = "default_description_path")]
    pub description_path: PathBuf,
    #[serde(default)]
    pub items_per_row: ItemsPerRow,
    #[serde(default)]
    pub density: Density,
    #[serde(default = "default_connector_height")]
    pub connector_height: f32,
    /// How long a selection waits for its images before opening with none
    #[serde(default = "default_resolve_timeout_ms")]
    pub resolve_timeout_ms: u64,
    /// Resolve images off the input thread
    #[serde(default = "default_background_images")]
    pub background_images: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            images_dir: default_images_dir(),
            title_path: default_title_path(),
            description_path: default_description_path(),
            items_per_row: ItemsPerRow::default(),
            density: Density::default(),
            connector_height: default_connector_height(),
            resolve_timeout_ms: default_resolve_timeout_ms(),
            background_images: default_background_images(),
        }
    }
}

impl TimelineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a settings file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            Error::Generic(format!("could not read config {}: {err}", path.display()))
        })?;
        let config = Self::from_json(&contents)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_millis(self.resolve_timeout_ms)
    }
}
