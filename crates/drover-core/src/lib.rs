#[macro_use]
pub mod internal;

pub use crate::internal::common::Map;
pub use crate::internal::common::ids::{AgentId, TaskId};
pub use crate::internal::common::utils::format_comma_delimited;

pub type Error = internal::common::error::DroverError;
pub type Result<T> = std::result::Result<T, Error>;

pub mod resources {
    pub use crate::internal::common::resources::{
        CPU_RESOURCE_NAME, DISK_RESOURCE_NAME, FRACTIONS_MAX_DIGITS, FRACTIONS_PER_UNIT,
        MAX_RESOURCE_UNITS, MEM_RESOURCE_NAME, NETWORK_BANDWIDTH_RESOURCE_NAME,
        PORTS_RESOURCE_NAME, Resource, ResourceAmount, ResourceFractions, ResourceUnits,
        ResourceValue, ResourceValueKind, Resources, UNRESERVED_ROLE, ValueRange, ValueRanges,
        ValueSet,
    };
}

pub mod sorter {
    pub use crate::internal::sorter::{
        AgentSorter, DimensionWeights, LexicographicSorter, RandomSorter, ResourceTotals,
        ResourceWeightedSorter, SortPolicy, SorterKind,
    };
}

pub mod admission {
    pub use crate::internal::admission::{
        AdmissionError, Label, Labels, NETWORK_BANDWIDTH_POOL, NETWORK_BANDWIDTH_RESOURCE_LABEL,
        TaskDeclaration, enforce_bandwidth,
    };
}

pub mod allocator {
    pub use crate::internal::allocator::{
        Allocator, AllocatorConfig, CycleReport, Launch, LaunchError, TaskOutcome,
    };
}
