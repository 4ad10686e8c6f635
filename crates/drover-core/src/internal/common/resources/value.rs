use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::internal::common::resources::ResourceAmount;
use crate::internal::common::utils::format_comma_delimited;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ResourceValueKind {
    Scalar,
    Ranges,
    Set,
}

/// Inclusive interval of integers, e.g. a span of ports.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ValueRange {
    pub begin: u64,
    // inclusive
    pub end: u64,
}

impl ValueRange {
    pub fn new(begin: u64, end: u64) -> Self {
        assert!(begin <= end);
        ValueRange { begin, end }
    }

    #[inline]
    fn covers(&self, other: &ValueRange) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }
}

impl Display for ValueRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}

/// Normalized list of ranges: sorted, without overlaps and without adjacent
/// neighbours (`[1-2, 3-4]` is stored as `[1-4]`).
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ValueRanges(SmallVec<[ValueRange; 2]>);

impl ValueRanges {
    pub fn new(ranges: impl IntoIterator<Item = ValueRange>) -> Self {
        let mut result = ValueRanges(ranges.into_iter().collect());
        result.normalize();
        result
    }

    fn normalize(&mut self) {
        if self.0.len() < 2 {
            return;
        }
        self.0.sort_unstable();
        let mut merged: SmallVec<[ValueRange; 2]> = SmallVec::with_capacity(self.0.len());
        for range in self.0.drain(..) {
            match merged.last_mut() {
                Some(last) if range.begin <= last.end.saturating_add(1) => {
                    last.end = last.end.max(range.end);
                }
                _ => merged.push(range),
            }
        }
        self.0 = merged;
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValueRange> {
        self.0.iter()
    }

    /// Number of integers covered by all ranges.
    pub fn size(&self) -> u64 {
        self.0.iter().map(|r| r.end - r.begin + 1).sum()
    }

    pub fn contains(&self, other: &ValueRanges) -> bool {
        // Both sides are normalized, so every range of `other` has to fit into
        // a single range of `self`.
        other
            .0
            .iter()
            .all(|needle| self.0.iter().any(|range| range.covers(needle)))
    }

    pub fn add(&mut self, other: &ValueRanges) {
        self.0.extend(other.0.iter().copied());
        self.normalize();
    }

    pub fn subtract(&mut self, other: &ValueRanges) {
        for cut in other.iter() {
            let mut remaining: SmallVec<[ValueRange; 2]> = SmallVec::with_capacity(self.0.len());
            for range in self.0.drain(..) {
                if cut.end < range.begin || cut.begin > range.end {
                    remaining.push(range);
                    continue;
                }
                if range.begin < cut.begin {
                    remaining.push(ValueRange::new(range.begin, cut.begin - 1));
                }
                if cut.end < range.end {
                    remaining.push(ValueRange::new(cut.end + 1, range.end));
                }
            }
            self.0 = remaining;
        }
    }
}

impl Display for ValueRanges {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", format_comma_delimited(self.0.iter()))
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ValueSet(BTreeSet<String>);

impl ValueSet {
    pub fn new<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        ValueSet(items.into_iter().map(|s| s.into()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, other: &ValueSet) -> bool {
        other.0.is_subset(&self.0)
    }

    pub fn add(&mut self, other: &ValueSet) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn subtract(&mut self, other: &ValueSet) {
        self.0.retain(|item| !other.0.contains(item));
    }
}

impl Display for ValueSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", format_comma_delimited(self.0.iter()))
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ResourceValue {
    Scalar(ResourceAmount),
    Ranges(ValueRanges),
    Set(ValueSet),
}

impl ResourceValue {
    pub fn kind(&self) -> ResourceValueKind {
        match self {
            ResourceValue::Scalar(_) => ResourceValueKind::Scalar,
            ResourceValue::Ranges(_) => ResourceValueKind::Ranges,
            ResourceValue::Set(_) => ResourceValueKind::Set,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ResourceValue::Scalar(amount) => amount.is_zero(),
            ResourceValue::Ranges(ranges) => ranges.is_empty(),
            ResourceValue::Set(set) => set.is_empty(),
        }
    }

    pub fn as_scalar(&self) -> Option<ResourceAmount> {
        match self {
            ResourceValue::Scalar(amount) => Some(*amount),
            ResourceValue::Ranges(_) | ResourceValue::Set(_) => None,
        }
    }

    // Callers guarantee that both values are of the same kind. Scalars saturate
    // at the largest amount.
    pub(crate) fn add(&mut self, other: &ResourceValue) {
        match (self, other) {
            (ResourceValue::Scalar(a), ResourceValue::Scalar(b)) => *a = a.saturating_add(*b),
            (ResourceValue::Ranges(a), ResourceValue::Ranges(b)) => a.add(b),
            (ResourceValue::Set(a), ResourceValue::Set(b)) => a.add(b),
            (a, b) => panic!("Adding incompatible resource values {a:?} and {b:?}"),
        }
    }

    pub(crate) fn contains(&self, other: &ResourceValue) -> bool {
        match (self, other) {
            (ResourceValue::Scalar(a), ResourceValue::Scalar(b)) => a >= b,
            (ResourceValue::Ranges(a), ResourceValue::Ranges(b)) => a.contains(b),
            (ResourceValue::Set(a), ResourceValue::Set(b)) => a.contains(b),
            _ => false,
        }
    }

    // Removes what is present, scalars stop at zero
    pub(crate) fn subtract(&mut self, other: &ResourceValue) {
        match (self, other) {
            (ResourceValue::Scalar(a), ResourceValue::Scalar(b)) => {
                *a = a.checked_sub(*b).unwrap_or(ResourceAmount::ZERO)
            }
            (ResourceValue::Ranges(a), ResourceValue::Ranges(b)) => a.subtract(b),
            (ResourceValue::Set(a), ResourceValue::Set(b)) => a.subtract(b),
            (a, b) => panic!("Subtracting incompatible resource values {a:?} and {b:?}"),
        }
    }
}

impl Display for ResourceValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceValue::Scalar(amount) => amount.fmt(f),
            ResourceValue::Ranges(ranges) => ranges.fmt(f),
            ResourceValue::Set(set) => set.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(items: &[(u64, u64)]) -> ValueRanges {
        ValueRanges::new(items.iter().map(|&(b, e)| ValueRange::new(b, e)))
    }

    #[test]
    fn test_ranges_normalize() {
        assert_eq!(ranges(&[(5, 7), (1, 2), (3, 4)]), ranges(&[(1, 7)]));
        assert_eq!(ranges(&[(1, 10), (2, 3)]), ranges(&[(1, 10)]));
        assert_eq!(ranges(&[(1, 2), (4, 5)]).size(), 4);
        assert_eq!(ranges(&[(1, 2), (4, 5)]).to_string(), "[1-2,4-5]");
    }

    #[test]
    fn test_ranges_contains() {
        let r = ranges(&[(31000, 31999), (33000, 33010)]);
        assert!(r.contains(&ranges(&[(31000, 31000)])));
        assert!(r.contains(&ranges(&[(31500, 31600), (33005, 33010)])));
        assert!(!r.contains(&ranges(&[(31990, 33000)])));
        assert!(!r.contains(&ranges(&[(1, 1)])));
        assert!(r.contains(&ValueRanges::default()));
    }

    #[test]
    fn test_ranges_subtract() {
        let mut r = ranges(&[(1, 10)]);
        r.subtract(&ranges(&[(3, 4), (10, 10)]));
        assert_eq!(r, ranges(&[(1, 2), (5, 9)]));
        r.subtract(&ranges(&[(1, 9)]));
        assert!(r.is_empty());
    }

    #[test]
    fn test_set_operations() {
        let mut s = ValueSet::new(["a", "b"]);
        assert!(s.contains(&ValueSet::new(["a"])));
        assert!(!s.contains(&ValueSet::new(["c"])));
        s.add(&ValueSet::new(["c"]));
        assert_eq!(s.len(), 3);
        s.subtract(&ValueSet::new(["a", "b"]));
        assert_eq!(s.to_string(), "{c}");
    }
}
