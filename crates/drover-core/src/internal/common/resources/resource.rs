use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::internal::common::resources::value::{ResourceValue, ValueRanges, ValueSet};
use crate::internal::common::resources::{ResourceAmount, ResourceValueKind};

pub const CPU_RESOURCE_NAME: &str = "cpus";
pub const MEM_RESOURCE_NAME: &str = "mem";
pub const DISK_RESOURCE_NAME: &str = "disk";
pub const PORTS_RESOURCE_NAME: &str = "ports";
pub const NETWORK_BANDWIDTH_RESOURCE_NAME: &str = "network_bandwidth";

/// Role of resources that are not reserved for anybody.
pub const UNRESERVED_ROLE: &str = "*";

/// A single named measurement, reserved for a role and optionally shared.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Resource {
    name: String,
    role: String,
    shared: bool,
    value: ResourceValue,
}

impl Resource {
    pub fn new<S: Into<String>>(name: S, value: ResourceValue) -> Self {
        Resource {
            name: name.into(),
            role: UNRESERVED_ROLE.to_string(),
            shared: false,
            value,
        }
    }

    pub fn scalar<S: Into<String>, A: Into<ResourceAmount>>(name: S, amount: A) -> Self {
        Self::new(name, ResourceValue::Scalar(amount.into()))
    }

    pub fn ranges<S: Into<String>>(name: S, ranges: ValueRanges) -> Self {
        Self::new(name, ResourceValue::Ranges(ranges))
    }

    pub fn set<S: Into<String>>(name: S, set: ValueSet) -> Self {
        Self::new(name, ResourceValue::Set(set))
    }

    pub fn with_role<S: Into<String>>(mut self, role: S) -> Self {
        self.role = role.into();
        self
    }

    pub fn into_shared(mut self) -> Self {
        self.shared = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn role(&self) -> &str {
        &self.role
    }

    #[inline]
    pub fn is_unreserved(&self) -> bool {
        self.role == UNRESERVED_ROLE
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    #[inline]
    pub fn value(&self) -> &ResourceValue {
        &self.value
    }

    #[inline]
    pub fn kind(&self) -> ResourceValueKind {
        self.value.kind()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn as_scalar(&self) -> Option<ResourceAmount> {
        self.value.as_scalar()
    }

    /// Non-shared resources with the same name, role and kind are merged
    /// into one entry.
    pub(crate) fn is_mergeable_with(&self, other: &Resource) -> bool {
        !self.shared
            && !other.shared
            && self.name == other.name
            && self.role == other.role
            && self.kind() == other.kind()
    }

    pub(crate) fn value_mut(&mut self) -> &mut ResourceValue {
        &mut self.value
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        match (self.is_unreserved(), self.shared) {
            (true, false) => {}
            (_, false) => write!(f, "({})", self.role)?,
            (_, true) => write!(f, "({},shared)", self.role)?,
        }
        write!(f, ":{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::common::resources::value::ValueRange;

    #[test]
    fn test_resource_display() {
        assert_eq!(Resource::scalar("cpus", 4u64).to_string(), "cpus:4");
        assert_eq!(
            Resource::scalar("mem", 128u64).with_role("web").to_string(),
            "mem(web):128"
        );
        assert_eq!(
            Resource::scalar("disk", 10u64).into_shared().to_string(),
            "disk(*,shared):10"
        );
        assert_eq!(
            Resource::ranges(
                "ports",
                ValueRanges::new([ValueRange::new(1, 2), ValueRange::new(5, 5)])
            )
            .to_string(),
            "ports:[1-2,5-5]"
        );
    }

    #[test]
    fn test_resource_mergeable() {
        let cpus = Resource::scalar("cpus", 1u64);
        assert!(cpus.is_mergeable_with(&Resource::scalar("cpus", 3u64)));
        assert!(!cpus.is_mergeable_with(&Resource::scalar("cpus", 3u64).with_role("a")));
        assert!(!cpus.is_mergeable_with(&Resource::scalar("mem", 1u64)));
        assert!(!cpus.is_mergeable_with(&Resource::scalar("cpus", 1u64).into_shared()));
    }
}
