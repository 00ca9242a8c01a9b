//! Browser adapters for the term-core ports.

pub mod clock;
pub mod storage;
pub mod ticker;

pub use clock::SystemClock;
pub use ticker::IntervalTicker;
