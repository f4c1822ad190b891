pub mod annotations;
pub mod deltas;
pub mod engine;
pub mod pacing;
pub mod speed;

pub use annotations::AnnotationTimerSet;
pub use deltas::{AnnotationKind, DeltaTracker};
pub use engine::{DrawPayload, InputEvent, PlaybackSession};
pub use pacing::FramePacer;
pub use speed::{SpeedController, SpeedRange, Track};

use thiserror::Error;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Running,
    Terminated,
}

/// Playback configuration
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    pub speed_range: SpeedRange,
    pub track: Track,
    /// Interval used until the slider is touched, in milliseconds
    pub initial_interval_ms: f64,
    /// Frames an annotation stays visible
    pub annotation_ticks: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed_range: SpeedRange::default(),
            track: Track::default(),
            initial_interval_ms: 200.0,
            annotation_ticks: 2,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PlaybackError {
    #[error("slider track collapses to a point ({min_x}..{max_x})")]
    DegenerateTrack { min_x: f32, max_x: f32 },
    #[error("invalid step interval range {min_ms}..{max_ms} ms")]
    InvalidSpeedRange { min_ms: f64, max_ms: f64 },
}
