use thiserror::Error;

use super::sample::{Direction, QueueLengths, RawRecord, Sample, APPROACH_COUNT};

/// Reasons a recorded sequence cannot be played back
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedDataError {
    #[error("no samples to play back")]
    Empty,
    #[error("record {index}: expected {APPROACH_COUNT} queue lengths, found {found}")]
    QueueCount { index: usize, found: usize },
    #[error("record {index}: negative queue length {value}")]
    NegativeQueue { index: usize, value: i64 },
    #[error("record {index}: green light {value} is not in 1..=4")]
    UnknownApproach { index: usize, value: i64 },
    #[error("record {index}: {reason}")]
    Record { index: usize, reason: String },
}

/// Ordered, read-only sequence of recorded samples
///
/// Never empty once loaded.
#[derive(Debug, Clone)]
pub struct SampleStore {
    samples: Vec<Sample>,
}

impl SampleStore {
    /// Validate every record and build the store. Any bad record fails the whole load.
    pub fn load(records: Vec<RawRecord>) -> Result<Self, MalformedDataError> {
        if records.is_empty() {
            return Err(MalformedDataError::Empty);
        }

        let samples = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| validate(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { samples })
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// First recorded sample; a loaded store always has one
    pub fn first(&self) -> &Sample {
        debug_assert!(!self.is_empty());
        &self.samples[0]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn validate(index: usize, record: RawRecord) -> Result<Sample, MalformedDataError> {
    let active = Direction::from_light(record.green_light).ok_or(
        MalformedDataError::UnknownApproach {
            index,
            value: record.green_light,
        },
    )?;

    if record.queues.len() != APPROACH_COUNT {
        return Err(MalformedDataError::QueueCount {
            index,
            found: record.queues.len(),
        });
    }

    let mut queues: QueueLengths = [0; APPROACH_COUNT];
    for (slot, &value) in queues.iter_mut().zip(record.queues.iter()) {
        if value < 0 {
            return Err(MalformedDataError::NegativeQueue { index, value });
        }
        *slot = u32::try_from(value).map_err(|_| MalformedDataError::Record {
            index,
            reason: format!("queue length {} is too large", value),
        })?;
    }

    Ok(Sample::new(active, queues))
}
