use imgui::{DrawListMut, Ui};

use crate::core::Direction;
use crate::playback::{AnnotationKind, DrawPayload};

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: [f32; 4] = [0.0, 0.8, 0.0, 1.0];
pub const GRAY: [f32; 4] = [0.78, 0.78, 0.78, 1.0];

const LIGHT_RADIUS: f32 = 20.0;
const QUEUE_OFFSET: f32 = 50.0;
const ANNOTATION_OFFSET: f32 = 32.0;

/// Screen positions of the intersection elements for a given canvas size
///
/// Lights sit on a diamond around the centre, queue counts just outside
/// each light, annotations beside the counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> [f32; 2] {
        [self.width / 2.0, self.height / 2.0]
    }

    pub fn light_center(&self, direction: Direction) -> [f32; 2] {
        let (w, h) = (self.width, self.height);
        match direction {
            Direction::North => [w / 2.0, h / 4.0],
            Direction::East => [3.0 * w / 4.0, h / 2.0],
            Direction::South => [w / 2.0, 3.0 * h / 4.0],
            Direction::West => [w / 4.0, h / 2.0],
        }
    }

    pub fn queue_anchor(&self, direction: Direction) -> [f32; 2] {
        let [x, y] = self.light_center(direction);
        match direction {
            Direction::North => [x, y - QUEUE_OFFSET],
            Direction::East => [x + QUEUE_OFFSET, y],
            Direction::South => [x, y + QUEUE_OFFSET],
            Direction::West => [x - QUEUE_OFFSET, y],
        }
    }

    pub fn annotation_anchor(&self, direction: Direction) -> [f32; 2] {
        let [x, y] = self.queue_anchor(direction);
        [x + ANNOTATION_OFFSET, y - ANNOTATION_OFFSET / 2.0]
    }
}

/// Colour used for an annotation label
pub fn annotation_color(kind: AnnotationKind) -> [f32; 4] {
    match kind {
        AnnotationKind::Increase => GREEN,
        AnnotationKind::Decrease => RED,
        AnnotationKind::None => BLACK,
    }
}

/// Draws the lights, queue counts and queue-change annotations
pub struct IntersectionView {
    layout: Layout,
}

impl IntersectionView {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn render(&self, ui: &Ui, frame: &DrawPayload, total_steps: usize) {
        let draw_list = ui.get_background_draw_list();

        self.draw_roads(&draw_list);

        for direction in Direction::ALL {
            let color = if direction == frame.active { GREEN } else { RED };
            draw_list
                .add_circle(self.layout.light_center(direction), LIGHT_RADIUS, color)
                .filled(true)
                .build();
            draw_centered_text(
                ui,
                &draw_list,
                self.layout.light_center(direction),
                WHITE,
                &direction.light().to_string(),
            );

            let count = frame.queues[direction.index()].to_string();
            draw_centered_text(ui, &draw_list, self.layout.queue_anchor(direction), BLACK, &count);
        }

        for &(direction, kind) in &frame.annotations {
            if let Some(label) = kind.label() {
                draw_centered_text(
                    ui,
                    &draw_list,
                    self.layout.annotation_anchor(direction),
                    annotation_color(kind),
                    label,
                );
            }
        }

        draw_list.add_text(
            [10.0, 10.0],
            BLACK,
            format!("Step {}/{}", frame.step + 1, total_steps),
        );
    }

    fn draw_roads(&self, draw_list: &DrawListMut<'_>) {
        let [cx, cy] = self.layout.center();
        let (w, h) = (self.layout.width, self.layout.height);
        let half = LIGHT_RADIUS * 1.5;

        draw_list
            .add_rect([cx - half, h * 0.15], [cx + half, h * 0.85], GRAY)
            .filled(true)
            .build();
        draw_list
            .add_rect([w * 0.15, cy - half], [w * 0.85, cy + half], GRAY)
            .filled(true)
            .build();
    }
}

fn draw_centered_text(ui: &Ui, draw_list: &DrawListMut<'_>, center: [f32; 2], color: [f32; 4], text: &str) {
    let [tw, th] = ui.calc_text_size(text);
    draw_list.add_text([center[0] - tw / 2.0, center[1] - th / 2.0], color, text);
}
