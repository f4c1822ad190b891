use crate::playback::InputEvent;

/// Turns raw cursor and button updates from the window into playback input
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: [f32; 2],
    button_held: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor moved to (x, y) in logical window coordinates
    pub fn moved(&mut self, x: f32, y: f32) -> InputEvent {
        self.position = [x, y];
        InputEvent::PointerMove {
            x,
            y,
            button_held: self.button_held,
        }
    }

    /// Primary button went down at the last known position
    pub fn pressed(&mut self) -> InputEvent {
        self.button_held = true;
        InputEvent::PointerDown {
            x: self.position[0],
            y: self.position[1],
            button_held: true,
        }
    }

    pub fn released(&mut self) {
        self.button_held = false;
    }

    /// Cursor left the window; a drag cannot continue without it
    pub fn left(&mut self) {
        self.button_held = false;
    }

    pub fn is_held(&self) -> bool {
        self.button_held
    }
}
