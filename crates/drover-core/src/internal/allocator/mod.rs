mod report;
mod session;

pub use report::{CycleReport, TaskOutcome};
pub use session::{Allocator, AllocatorConfig, Launch, LaunchError};
