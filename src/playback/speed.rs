use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::playback::PlaybackError;

/// Bounds for the time between two recorded steps, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min_ms: 10.0,
            max_ms: 1000.0,
        }
    }
}

/// Horizontal slider track in window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub min_x: f32,
    pub max_x: f32,
    pub y: f32,
    /// Half-height of the band around `y` that reacts to the pointer
    pub tolerance: f32,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            min_x: 100.0,
            max_x: 500.0,
            y: 560.0,
            tolerance: 12.0,
        }
    }
}

impl Track {
    /// Whether a pointer at height `y` is grabbing the slider; x is clamped later
    pub fn accepts(&self, y: f32) -> bool {
        (y - self.y).abs() <= self.tolerance
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }
}

/// Maps the slider knob position to the step interval
#[derive(Debug, Clone)]
pub struct SpeedController {
    range: SpeedRange,
    track: Track,
    interval_ms: f64,
}

impl SpeedController {
    /// Starts at the slowest setting; use `set_interval` to pick another start
    pub fn new(range: SpeedRange, track: Track) -> Result<Self, PlaybackError> {
        if track.min_x.is_nan() || track.max_x.is_nan() || track.max_x <= track.min_x {
            return Err(PlaybackError::DegenerateTrack {
                min_x: track.min_x,
                max_x: track.max_x,
            });
        }
        if range.min_ms.is_nan()
            || range.max_ms.is_nan()
            || range.min_ms <= 0.0
            || range.max_ms < range.min_ms
        {
            return Err(PlaybackError::InvalidSpeedRange {
                min_ms: range.min_ms,
                max_ms: range.max_ms,
            });
        }

        Ok(Self {
            range,
            track,
            interval_ms: range.max_ms,
        })
    }

    /// Move the knob to `x`; positions off the track clamp to its ends
    pub fn set_position(&mut self, x: f32) {
        let x = x.clamp(self.track.min_x, self.track.max_x);
        let fraction = ((x - self.track.min_x) / self.track.width()) as f64;
        self.interval_ms = self.range.min_ms + fraction * (self.range.max_ms - self.range.min_ms);
    }

    /// Set the interval directly, clamped to the configured range
    pub fn set_interval(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms.clamp(self.range.min_ms, self.range.max_ms);
    }

    /// Current interval in milliseconds
    pub fn current_interval(&self) -> f64 {
        self.interval_ms
    }

    pub fn interval_duration(&self) -> Duration {
        Duration::from_micros((self.interval_ms * 1000.0).round() as u64)
    }

    /// Knob x coordinate matching the current interval
    pub fn knob_position(&self) -> f32 {
        let span = self.range.max_ms - self.range.min_ms;
        if span <= 0.0 {
            return self.track.min_x;
        }
        let fraction = (self.interval_ms - self.range.min_ms) / span;
        self.track.min_x + fraction as f32 * self.track.width()
    }

    pub fn track(&self) -> &Track {
        &self.track
    }
}
