use crate::core::{Direction, QueueLengths, Sample, APPROACH_COUNT};

/// What happened to a queue between two consecutive steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationKind {
    #[default]
    None,
    Increase,
    Decrease,
}

impl AnnotationKind {
    /// Text shown next to the queue count
    pub fn label(self) -> Option<&'static str> {
        match self {
            AnnotationKind::None => None,
            AnnotationKind::Increase => Some("+1"),
            AnnotationKind::Decrease => Some("-1"),
        }
    }
}

/// A queue-change annotation with the number of frames it stays on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnnotationEvent {
    pub kind: AnnotationKind,
    pub ticks_remaining: u32,
}

impl AnnotationEvent {
    pub const NONE: AnnotationEvent = AnnotationEvent {
        kind: AnnotationKind::None,
        ticks_remaining: 0,
    };

    pub fn new(kind: AnnotationKind, ticks: u32) -> Self {
        Self {
            kind,
            ticks_remaining: ticks,
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == AnnotationKind::None
    }

    pub fn is_visible(&self) -> bool {
        self.kind != AnnotationKind::None && self.ticks_remaining > 0
    }
}

/// Compare two queue vectors and produce one event per approach
///
/// Growth is annotated on every approach. Shrinkage is only annotated on the
/// approach holding the green light, since cars leave only through it.
pub fn compute_deltas(
    current: &QueueLengths,
    previous: &QueueLengths,
    active: Direction,
    ticks: u32,
) -> [AnnotationEvent; APPROACH_COUNT] {
    let mut events = [AnnotationEvent::NONE; APPROACH_COUNT];

    for direction in Direction::ALL {
        let i = direction.index();
        let diff = current[i] as i64 - previous[i] as i64;

        events[i] = if diff > 0 {
            AnnotationEvent::new(AnnotationKind::Increase, ticks)
        } else if diff < 0 && direction == active {
            AnnotationEvent::new(AnnotationKind::Decrease, ticks)
        } else {
            AnnotationEvent::NONE
        };
    }

    events
}

/// Holds the previously shown queue vector across frames
#[derive(Debug, Clone)]
pub struct DeltaTracker {
    previous: QueueLengths,
    ticks: u32,
}

impl DeltaTracker {
    /// The first frame compares against an all-zero vector
    pub fn new(ticks: u32) -> Self {
        Self {
            previous: [0; APPROACH_COUNT],
            ticks,
        }
    }

    /// Compute events for `sample` and remember its queues for the next frame
    pub fn observe(&mut self, sample: &Sample) -> [AnnotationEvent; APPROACH_COUNT] {
        let events = compute_deltas(&sample.queues, &self.previous, sample.active, self.ticks);
        self.previous = sample.queues;
        events
    }
}
