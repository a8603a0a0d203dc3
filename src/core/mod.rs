pub mod acquisition;
pub mod snapshot_writer;

pub use acquisition::{AcquisitionLoop, RunOutcome};
