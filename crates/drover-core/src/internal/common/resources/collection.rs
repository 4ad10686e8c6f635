use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::internal::common::resources::{Resource, ResourceAmount, UNRESERVED_ROLE};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SharedResource {
    resource: Resource,
    count: u32,
}

/// Multiset of resources.
///
/// Non-shared resources are merged by (name, role, kind), so there is at most
/// one entry per such key. Shared resources are kept by their full identity
/// together with the number of copies.
///
/// Empty resources (zero scalars, empty ranges and sets) are never stored,
/// which also drops scalars below the fixed point precision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resources {
    items: Vec<Resource>,
    shared: Vec<SharedResource>,
}

impl Resources {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.shared.is_empty()
    }

    /// Iterates over all resources, each shared resource is visited once
    /// regardless of the number of its copies.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.items
            .iter()
            .chain(self.shared.iter().map(|s| &s.resource))
    }

    /// Number of copies of a shared resource held in this collection.
    pub fn shared_count(&self, resource: &Resource) -> u32 {
        self.shared
            .iter()
            .find(|s| &s.resource == resource)
            .map(|s| s.count)
            .unwrap_or(0)
    }

    pub fn add_resource(&mut self, resource: &Resource) {
        self.add_resource_copies(resource, 1);
    }

    fn add_resource_copies(&mut self, resource: &Resource, copies: u32) {
        if resource.is_empty() || copies == 0 {
            return;
        }
        if resource.is_shared() {
            match self.shared.iter_mut().find(|s| &s.resource == resource) {
                Some(entry) => entry.count += copies,
                None => self.shared.push(SharedResource {
                    resource: resource.clone(),
                    count: copies,
                }),
            }
        } else {
            match self
                .items
                .iter_mut()
                .find(|r| r.is_mergeable_with(resource))
            {
                Some(entry) => entry.value_mut().add(resource.value()),
                None => self.items.push(resource.clone()),
            }
        }
    }

    pub fn contains_resource(&self, resource: &Resource) -> bool {
        if resource.is_empty() {
            return true;
        }
        if resource.is_shared() {
            self.shared_count(resource) > 0
        } else {
            self.items
                .iter()
                .any(|r| r.is_mergeable_with(resource) && r.value().contains(resource.value()))
        }
    }

    pub fn subtract_resource(&mut self, resource: &Resource) {
        self.subtract_resource_copies(resource, 1);
    }

    fn subtract_resource_copies(&mut self, resource: &Resource, copies: u32) {
        if resource.is_empty() {
            return;
        }
        if resource.is_shared() {
            if let Some(position) = self.shared.iter().position(|s| &s.resource == resource) {
                let entry = &mut self.shared[position];
                entry.count = entry.count.saturating_sub(copies);
                if entry.count == 0 {
                    self.shared.swap_remove(position);
                }
            }
        } else if let Some(position) = self
            .items
            .iter()
            .position(|r| r.is_mergeable_with(resource))
        {
            let entry = &mut self.items[position];
            entry.value_mut().subtract(resource.value());
            if entry.is_empty() {
                self.items.swap_remove(position);
            }
        }
    }

    /// Returns true if `other` can be subtracted from `self` without any
    /// component (shared copies included) going below zero.
    pub fn contains(&self, other: &Resources) -> bool {
        if !other.items.iter().all(|r| self.contains_resource(r)) {
            return false;
        }
        other
            .shared
            .iter()
            .all(|s| self.shared_count(&s.resource) >= s.count)
    }

    pub fn shared(&self) -> Resources {
        Resources {
            items: Vec::new(),
            shared: self.shared.clone(),
        }
    }

    pub fn non_shared(&self) -> Resources {
        Resources {
            items: self.items.clone(),
            shared: Vec::new(),
        }
    }

    /// Keeps resources matching the predicate, shared copies are preserved.
    pub fn filter<F: Fn(&Resource) -> bool>(&self, predicate: F) -> Resources {
        Resources {
            items: self
                .items
                .iter()
                .filter(|r| predicate(r))
                .cloned()
                .collect(),
            shared: self
                .shared
                .iter()
                .filter(|s| predicate(&s.resource))
                .cloned()
                .collect(),
        }
    }

    /// Projects the collection to scalar amounts merged by name only.
    /// Roles and the shared flag are dropped, a shared resource contributes
    /// a single copy.
    pub fn stripped_scalar_quantity(&self) -> Resources {
        let mut result = Resources::new();
        for resource in self.iter() {
            if let Some(amount) = resource.as_scalar() {
                result.add_resource(&Resource::scalar(resource.name(), amount));
            }
        }
        result
    }

    fn sum_scalars<F: Fn(&Resource) -> bool>(&self, predicate: F) -> Option<ResourceAmount> {
        let amount = self
            .iter()
            .filter(|r| predicate(r))
            .filter_map(|r| r.as_scalar())
            .fold(ResourceAmount::ZERO, ResourceAmount::saturating_add);
        (!amount.is_zero()).then_some(amount)
    }

    /// Scalar amount of a resource summed over all roles.
    pub fn scalar(&self, name: &str) -> Option<ResourceAmount> {
        self.sum_scalars(|r| r.name() == name)
    }

    /// Scalar amount of a resource in the unreserved role.
    pub fn unreserved_scalar(&self, name: &str) -> Option<ResourceAmount> {
        self.sum_scalars(|r| r.name() == name && r.role() == UNRESERVED_ROLE)
    }

    pub fn get(&self, name: &str, role: &str) -> Option<&Resource> {
        self.iter().find(|r| r.name() == name && r.role() == role)
    }
}

impl PartialEq for Resources {
    fn eq(&self, other: &Self) -> bool {
        self.contains(other) && other.contains(self)
    }
}

impl Eq for Resources {}

impl From<Resource> for Resources {
    fn from(resource: Resource) -> Self {
        let mut result = Resources::new();
        result.add_resource(&resource);
        result
    }
}

impl FromIterator<Resource> for Resources {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut result = Resources::new();
        for resource in iter {
            result.add_resource(&resource);
        }
        result
    }
}

impl AddAssign<&Resources> for Resources {
    fn add_assign(&mut self, other: &Resources) {
        for resource in &other.items {
            self.add_resource(resource);
        }
        for shared in &other.shared {
            self.add_resource_copies(&shared.resource, shared.count);
        }
    }
}

impl AddAssign<Resource> for Resources {
    fn add_assign(&mut self, resource: Resource) {
        self.add_resource(&resource);
    }
}

impl SubAssign<&Resources> for Resources {
    fn sub_assign(&mut self, other: &Resources) {
        for resource in &other.items {
            self.subtract_resource(resource);
        }
        for shared in &other.shared {
            self.subtract_resource_copies(&shared.resource, shared.count);
        }
    }
}

impl Add<&Resources> for &Resources {
    type Output = Resources;

    fn add(self, other: &Resources) -> Resources {
        let mut result = self.clone();
        result += other;
        result
    }
}

impl Sub<&Resources> for &Resources {
    type Output = Resources;

    fn sub(self, other: &Resources) -> Resources {
        let mut result = self.clone();
        result -= other;
        result
    }
}

impl Display for Resources {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("{}");
        }
        let mut first = true;
        let copies = self
            .items
            .iter()
            .map(|r| (r, 1))
            .chain(self.shared.iter().map(|s| (&s.resource, s.count)));
        for (resource, count) in copies {
            for _ in 0..count {
                if !first {
                    f.write_str(";")?;
                }
                first = false;
                resource.fmt(f)?;
            }
        }
        Ok(())
    }
}
