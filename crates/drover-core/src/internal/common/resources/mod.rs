pub mod amount;
pub mod collection;
pub mod resource;
pub mod value;

pub use amount::{
    FRACTIONS_MAX_DIGITS, FRACTIONS_PER_UNIT, MAX_RESOURCE_UNITS, ResourceAmount,
    ResourceFractions, ResourceUnits,
};
pub use collection::Resources;
pub use resource::{
    CPU_RESOURCE_NAME, DISK_RESOURCE_NAME, MEM_RESOURCE_NAME, NETWORK_BANDWIDTH_RESOURCE_NAME,
    PORTS_RESOURCE_NAME, Resource, UNRESERVED_ROLE,
};
pub use value::{ResourceValue, ResourceValueKind, ValueRange, ValueRanges, ValueSet};
