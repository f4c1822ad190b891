use std::time::Duration;
use tracing::{debug, info};

use crate::core::{Direction, QueueLengths, SampleStore};
use crate::playback::pacing::target_fps;
use crate::playback::{
    AnnotationKind, AnnotationTimerSet, DeltaTracker, PlaybackConfig, PlaybackError,
    PlaybackState, SpeedController,
};

/// Pointer and window events delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, button_held: bool },
    PointerMove { x: f32, y: f32, button_held: bool },
    Quit,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPayload {
    /// Index of the sample shown
    pub step: usize,
    pub active: Direction,
    pub queues: QueueLengths,
    /// Annotations still counting down, in direction order
    pub annotations: Vec<(Direction, AnnotationKind)>,
    /// Slider knob x coordinate
    pub knob_x: f32,
    pub interval_ms: f64,
}

/// Replays a sample store in a loop
///
/// The host calls `handle_input` for every event, `tick` whenever the
/// interval reported by `frame_interval` has elapsed, and `current_frame`
/// whenever it redraws.
pub struct PlaybackSession {
    store: SampleStore,
    cursor: usize,
    tracker: DeltaTracker,
    annotations: AnnotationTimerSet,
    speed: SpeedController,
    state: PlaybackState,
    frame: DrawPayload,
    frames_played: u64,
}

impl PlaybackSession {
    pub fn new(store: SampleStore, config: &PlaybackConfig) -> Result<Self, PlaybackError> {
        let mut speed = SpeedController::new(config.speed_range, config.track)?;
        speed.set_interval(config.initial_interval_ms);

        let first = store.first();
        let frame = DrawPayload {
            step: 0,
            active: first.active,
            queues: first.queues,
            annotations: Vec::new(),
            knob_x: speed.knob_position(),
            interval_ms: speed.current_interval(),
        };

        info!(
            "Playback session ready: {} samples, {:.0} ms per step",
            store.len(),
            speed.current_interval()
        );

        Ok(Self {
            store,
            cursor: 0,
            tracker: DeltaTracker::new(config.annotation_ticks),
            annotations: AnnotationTimerSet::new(),
            speed,
            state: PlaybackState::Running,
            frame,
            frames_played: 0,
        })
    }

    /// Apply one input event. Presses and drags near the slider move it.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y, .. } | InputEvent::PointerMove { x, y, button_held: true } => {
                if self.speed.track().accepts(y) {
                    self.speed.set_position(x);
                    self.frame.knob_x = self.speed.knob_position();
                    self.frame.interval_ms = self.speed.current_interval();
                    let interval = self.speed.current_interval();
                    debug!("Step interval set to {:.0} ms ({:.1} fps)", interval, target_fps(interval));
                }
            }
            InputEvent::PointerMove { .. } => {}
            InputEvent::Quit => {
                if self.state == PlaybackState::Running {
                    info!("Quit requested after {} frames", self.frames_played);
                }
                self.state = PlaybackState::Terminated;
            }
        }
    }

    /// Play the sample under the cursor, then advance the cursor
    pub fn tick(&mut self) -> &DrawPayload {
        if self.state == PlaybackState::Terminated {
            return &self.frame;
        }

        let step = self.cursor;
        if let Some(sample) = self.store.get(step) {
            let events = self.tracker.observe(sample);
            for direction in Direction::ALL {
                let event = events[direction.index()];
                if !event.is_none() {
                    self.annotations.record(direction, event);
                }
            }
            self.annotations.tick();

            self.frame = DrawPayload {
                step,
                active: sample.active,
                queues: sample.queues,
                annotations: self.annotations.visible(),
                knob_x: self.speed.knob_position(),
                interval_ms: self.speed.current_interval(),
            };
        }

        self.frames_played += 1;
        self.advance();
        &self.frame
    }

    /// Last frame produced by `tick`
    pub fn current_frame(&self) -> &DrawPayload {
        &self.frame
    }

    fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.store.len();
        if self.cursor == 0 {
            debug!("Playback wrapped after {} frames", self.frames_played);
        }
    }

    /// Index of the sample the next `tick` will play
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn frame_interval(&self) -> Duration {
        self.speed.interval_duration()
    }

    pub fn speed(&self) -> &SpeedController {
        &self.speed
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn total_samples(&self) -> usize {
        self.store.len()
    }

    pub fn frames_played(&self) -> u64 {
        self.frames_played
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawRecord;

    fn session(records: Vec<RawRecord>) -> PlaybackSession {
        let store = SampleStore::load(records).unwrap();
        PlaybackSession::new(store, &PlaybackConfig::default()).unwrap()
    }

    fn scenario() -> PlaybackSession {
        session(vec![
            RawRecord::new(1, vec![0, 0, 0, 0]),
            RawRecord::new(1, vec![1, 0, 0, 0]),
            RawRecord::new(2, vec![0, 0, 0, 0]),
        ])
    }

    #[test]
    fn test_initial_frame_shows_first_sample() {
        let playback = session(vec![
            RawRecord::new(4, vec![3, 1, 4, 1]),
            RawRecord::new(1, vec![0, 0, 0, 0]),
        ]);
        let frame = playback.current_frame();
        assert_eq!(frame.step, 0);
        assert_eq!(frame.active, Direction::West);
        assert_eq!(frame.queues, [3, 1, 4, 1]);
        assert!(frame.annotations.is_empty());
    }

    #[test]
    fn test_cursor_wraps_around() {
        let mut playback = scenario();
        for n in 1..=10u64 {
            playback.tick();
            assert_eq!(playback.cursor() as u64, n % 3);
        }
        assert_eq!(playback.frames_played(), 10);
    }

    #[test]
    fn test_decrease_off_green_is_not_annotated() {
        let mut playback = scenario();

        let frame = playback.tick().clone();
        assert_eq!(frame.step, 0);
        assert!(frame.annotations.is_empty());

        let frame = playback.tick().clone();
        assert_eq!(frame.step, 1);
        assert_eq!(frame.annotations, vec![(Direction::North, AnnotationKind::Increase)]);

        let frame = playback.tick().clone();
        assert_eq!(frame.step, 2);
        assert_eq!(frame.active, Direction::East);
        assert!(frame.annotations.is_empty());
    }

    #[test]
    fn test_decrease_on_green_is_annotated() {
        let mut playback = session(vec![
            RawRecord::new(3, vec![0, 0, 2, 0]),
            RawRecord::new(3, vec![0, 0, 1, 0]),
        ]);

        let first = playback.tick().clone();
        assert_eq!(first.annotations, vec![(Direction::South, AnnotationKind::Increase)]);

        let second = playback.tick().clone();
        assert_eq!(second.annotations, vec![(Direction::South, AnnotationKind::Decrease)]);
    }

    #[test]
    fn test_previous_vector_carries_across_wrap() {
        let mut playback = session(vec![
            RawRecord::new(2, vec![0, 4, 0, 0]),
            RawRecord::new(2, vec![0, 4, 0, 0]),
        ]);

        // First frame compares against zeros
        assert_eq!(
            playback.tick().annotations,
            vec![(Direction::East, AnnotationKind::Increase)]
        );
        // Budget of two frames: gone on the next unchanged step
        assert!(playback.tick().annotations.is_empty());
        // Wrapped: previous is [0, 4, 0, 0], not zeros
        assert!(playback.tick().annotations.is_empty());
    }

    #[test]
    fn test_first_frame_increase_burst() {
        let mut playback = session(vec![RawRecord::new(1, vec![2, 0, 5, 1])]);
        let frame = playback.tick();
        assert_eq!(
            frame.annotations,
            vec![
                (Direction::North, AnnotationKind::Increase),
                (Direction::South, AnnotationKind::Increase),
                (Direction::West, AnnotationKind::Increase),
            ]
        );
    }

    #[test]
    fn test_slider_press_changes_interval() {
        let mut playback = scenario();
        assert_eq!(playback.frame_interval(), Duration::from_millis(200));

        playback.handle_input(InputEvent::PointerDown { x: 100.0, y: 560.0, button_held: true });
        assert_eq!(playback.speed().current_interval(), 10.0);
        assert_eq!(playback.current_frame().knob_x, 100.0);
        assert_eq!(playback.frame_interval(), Duration::from_millis(10));

        // Drag past the end clamps
        playback.handle_input(InputEvent::PointerMove { x: 900.0, y: 565.0, button_held: true });
        assert_eq!(playback.speed().current_interval(), 1000.0);
        assert_eq!(playback.tick().interval_ms, 1000.0);
    }

    #[test]
    fn test_drag_past_track_end_reaches_slowest() {
        let mut playback = scenario();

        playback.handle_input(InputEvent::PointerDown { x: 300.0, y: 560.0, button_held: true });
        assert!((playback.speed().current_interval() - 505.0).abs() < 1e-6);

        playback.handle_input(InputEvent::PointerMove { x: 530.0, y: 560.0, button_held: true });
        assert_eq!(playback.speed().current_interval(), 1000.0);
        assert_eq!(playback.current_frame().knob_x, 500.0);

        // Back past the start while still in the band
        playback.handle_input(InputEvent::PointerMove { x: 40.0, y: 555.0, button_held: true });
        assert_eq!(playback.speed().current_interval(), 10.0);
        assert_eq!(playback.current_frame().knob_x, 100.0);
    }

    #[test]
    fn test_press_left_of_track_in_band_clamps() {
        let mut playback = scenario();

        playback.handle_input(InputEvent::PointerDown { x: 5.0, y: 566.0, button_held: true });
        assert_eq!(playback.speed().current_interval(), 10.0);

        playback.handle_input(InputEvent::PointerDown { x: 590.0, y: 554.0, button_held: true });
        assert_eq!(playback.speed().current_interval(), 1000.0);
    }

    #[test]
    fn test_pointer_away_from_slider_is_ignored() {
        let mut playback = scenario();

        playback.handle_input(InputEvent::PointerDown { x: 100.0, y: 300.0, button_held: true });
        assert_eq!(playback.speed().current_interval(), 200.0);

        // Hover without a held button
        playback.handle_input(InputEvent::PointerMove { x: 100.0, y: 560.0, button_held: false });
        assert_eq!(playback.speed().current_interval(), 200.0);
    }

    #[test]
    fn test_quit_stops_playback() {
        let mut playback = scenario();
        playback.tick();
        playback.handle_input(InputEvent::Quit);
        assert!(!playback.is_running());

        let cursor = playback.cursor();
        playback.tick();
        assert_eq!(playback.cursor(), cursor);
    }

    #[test]
    fn test_degenerate_track_is_fatal() {
        let store = SampleStore::load(vec![RawRecord::new(1, vec![0, 0, 0, 0])]).unwrap();
        let mut config = PlaybackConfig::default();
        config.track.max_x = config.track.min_x;
        assert!(PlaybackSession::new(store, &config).is_err());
    }
}
