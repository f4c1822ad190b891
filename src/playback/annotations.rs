use crate::core::{Direction, APPROACH_COUNT};
use crate::playback::deltas::{AnnotationEvent, AnnotationKind};

/// Short-lived annotations, one slot per approach
///
/// A slot whose counter hit zero may still hold its old kind; only
/// `visible()` and `is_visible()` decide what gets drawn.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTimerSet {
    slots: [AnnotationEvent; APPROACH_COUNT],
}

impl AnnotationTimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an event for `direction`, replacing whatever was counting down
    pub fn record(&mut self, direction: Direction, event: AnnotationEvent) {
        self.slots[direction.index()] = event;
    }

    /// Advance every countdown by one frame
    pub fn tick(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.ticks_remaining = slot.ticks_remaining.saturating_sub(1);
        }
    }

    pub fn get(&self, direction: Direction) -> AnnotationEvent {
        self.slots[direction.index()]
    }

    pub fn is_visible(&self, direction: Direction) -> bool {
        self.get(direction).is_visible()
    }

    /// Annotations that should be drawn this frame
    pub fn visible(&self) -> Vec<(Direction, AnnotationKind)> {
        Direction::ALL
            .iter()
            .filter(|&&d| self.is_visible(d))
            .map(|&d| (d, self.get(d).kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_budget() {
        let mut timers = AnnotationTimerSet::new();
        timers.record(Direction::North, AnnotationEvent::new(AnnotationKind::Increase, 3));

        timers.tick();
        assert!(timers.is_visible(Direction::North));
        timers.tick();
        assert!(timers.is_visible(Direction::North));
        timers.tick();
        assert!(!timers.is_visible(Direction::North));
        assert_eq!(timers.get(Direction::North).ticks_remaining, 0);
        assert!(timers.visible().is_empty());

        // Clamped at zero
        timers.tick();
        assert_eq!(timers.get(Direction::North).ticks_remaining, 0);
    }

    #[test]
    fn test_record_overwrites_mid_countdown() {
        let mut timers = AnnotationTimerSet::new();
        timers.record(Direction::East, AnnotationEvent::new(AnnotationKind::Increase, 3));
        timers.tick();
        timers.tick();

        timers.record(Direction::East, AnnotationEvent::new(AnnotationKind::Decrease, 3));
        assert_eq!(
            timers.get(Direction::East),
            AnnotationEvent::new(AnnotationKind::Decrease, 3)
        );
        assert_eq!(timers.visible(), vec![(Direction::East, AnnotationKind::Decrease)]);
    }

    #[test]
    fn test_tick_on_empty_set_is_noop() {
        let mut timers = AnnotationTimerSet::new();
        timers.tick();
        for direction in Direction::ALL {
            assert_eq!(timers.get(direction), AnnotationEvent::NONE);
        }
        assert!(timers.visible().is_empty());
    }

    #[test]
    fn test_visible_in_direction_order() {
        let mut timers = AnnotationTimerSet::new();
        timers.record(Direction::West, AnnotationEvent::new(AnnotationKind::Increase, 2));
        timers.record(Direction::North, AnnotationEvent::new(AnnotationKind::Decrease, 2));
        assert_eq!(
            timers.visible(),
            vec![
                (Direction::North, AnnotationKind::Decrease),
                (Direction::West, AnnotationKind::Increase),
            ]
        );
    }
}
