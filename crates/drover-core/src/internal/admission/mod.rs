mod bandwidth;
mod task;

pub use bandwidth::{
    AdmissionError, NETWORK_BANDWIDTH_POOL, NETWORK_BANDWIDTH_RESOURCE_LABEL, enforce_bandwidth,
};
pub use task::{Label, Labels, TaskDeclaration};
