pub mod sample;
pub mod store;

pub use sample::{Direction, QueueLengths, RawRecord, Sample, APPROACH_COUNT};
pub use store::{MalformedDataError, SampleStore};
