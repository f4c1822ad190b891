use imgui::Ui;

use crate::playback::{DrawPayload, Track};
use crate::ui::intersection::{BLACK, GRAY};

const KNOB_RADIUS: f32 = 9.0;
const KNOB_COLOR: [f32; 4] = [0.2, 0.4, 0.9, 1.0];

/// Draws the step-interval slider; dragging is handled by the playback session
pub struct SpeedSlider {
    track: Track,
}

impl SpeedSlider {
    pub fn new(track: Track) -> Self {
        Self { track }
    }

    pub fn render(&self, ui: &Ui, frame: &DrawPayload) {
        let draw_list = ui.get_background_draw_list();
        let y = self.track.y;

        draw_list
            .add_line([self.track.min_x, y], [self.track.max_x, y], GRAY)
            .thickness(4.0)
            .build();
        draw_list
            .add_circle([frame.knob_x, y], KNOB_RADIUS, KNOB_COLOR)
            .filled(true)
            .build();

        let label = interval_label(frame.interval_ms);
        let [tw, th] = ui.calc_text_size(&label);
        let x = (self.track.min_x + self.track.max_x - tw) / 2.0;
        draw_list.add_text([x, y - KNOB_RADIUS - th - 4.0], BLACK, label);
    }
}

pub fn interval_label(interval_ms: f64) -> String {
    format!("Interval: {:.0} ms", interval_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_label() {
        assert_eq!(interval_label(200.0), "Interval: 200 ms");
        assert_eq!(interval_label(504.6), "Interval: 505 ms");
    }
}
