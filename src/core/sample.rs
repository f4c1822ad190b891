/// Number of approaches feeding the intersection
pub const APPROACH_COUNT: usize = 4;

/// Queue length per approach, indexed by `Direction::index()`
pub type QueueLengths = [u32; APPROACH_COUNT];

/// One of the four approaches of the intersection
///
/// The recorded data numbers the lights 1..=4 clockwise starting at north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; APPROACH_COUNT] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Map a recorded light number (1..=4) to a direction
    pub fn from_light(light: i64) -> Option<Self> {
        match light {
            1 => Some(Direction::North),
            2 => Some(Direction::East),
            3 => Some(Direction::South),
            4 => Some(Direction::West),
            _ => None,
        }
    }

    /// Light number as it appears in the recorded data
    pub fn light(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Position in a `QueueLengths` vector
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

/// A single recorded time step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Approach that has the green light during this step
    pub active: Direction,

    /// Cars waiting on each approach
    pub queues: QueueLengths,
}

impl Sample {
    pub fn new(active: Direction, queues: QueueLengths) -> Self {
        Self { active, queues }
    }
}

/// Unvalidated record as handed over by a data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub green_light: i64,
    pub queues: Vec<i64>,
}

impl RawRecord {
    pub fn new(green_light: i64, queues: Vec<i64>) -> Self {
        Self { green_light, queues }
    }
}
