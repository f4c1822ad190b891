use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use clap::Parser;
use thiserror::Error;
use tracing::{debug, info};

use crate::playback::{PlaybackConfig, PlaybackError, SpeedController, SpeedRange, Track};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error("annotation_ticks must be at least 1")]
    ZeroAnnotationTicks,
}

/// Tunable parameters, read once at startup
///
/// Nothing is written back; playback always starts fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_width: f64,
    pub window_height: f64,
    pub speed_range: SpeedRange,
    pub initial_interval_ms: f64,
    pub annotation_ticks: u32,
    pub track: Track,
    pub font_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 600.0,
            window_height: 600.0,
            speed_range: SpeedRange::default(),
            initial_interval_ms: 200.0,
            annotation_ticks: 2,
            track: Track::default(),
            font_size: 24.0,
        }
    }
}

impl Settings {
    /// Default location: `<config dir>/traffic-viz/settings.json`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("traffic-viz").join("settings.json"))
    }

    /// Load from an explicit file, or from the default location when it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let settings = match explicit {
            Some(path) => Self::load_from(path)?,
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => {
                    debug!("No settings file, using defaults");
                    Self::default()
                }
            },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        SpeedController::new(self.speed_range, self.track)?;
        if self.annotation_ticks == 0 {
            return Err(SettingsError::ZeroAnnotationTicks);
        }
        Ok(())
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            speed_range: self.speed_range,
            track: self.track,
            initial_interval_ms: self.initial_interval_ms,
            annotation_ticks: self.annotation_ticks,
        }
    }
}

/// Replay recorded intersection states
#[derive(Debug, Clone, Default, PartialEq, Parser)]
#[command(name = "traffic-viz")]
#[command(about = "Replay recorded traffic intersection states")]
pub struct CliArgs {
    /// Recorded samples CSV (defaults to traffic_samples.csv, then a file dialog)
    pub data_path: Option<PathBuf>,

    /// Settings JSON overriding the per-user config file
    #[arg(short, long = "settings")]
    pub settings_path: Option<PathBuf>,
}
