use derive_more::{Add, AddAssign, Sub, SubAssign};
use serde::{Deserialize, Serialize};

pub type ResourceUnits = u64;
pub type ResourceFractions = u32;

pub const FRACTIONS_PER_UNIT: ResourceFractions = 10_000;
pub const FRACTIONS_MAX_DIGITS: usize = 4; // = log10(FRACTIONS_PER_UNIT)

/// Largest number of whole units that can be stored in a [`ResourceAmount`].
pub const MAX_RESOURCE_UNITS: ResourceUnits = u64::MAX / FRACTIONS_PER_UNIT as u64;

/// Scalar quantity of a resource, stored as fixed point with
/// [`FRACTIONS_MAX_DIGITS`] fractional digits.
///
/// Anything smaller than one fraction (0.0001) cannot be represented and is
/// considered negligible.
#[derive(
    Debug,
    Default,
    Serialize,
    Clone,
    Copy,
    Hash,
    Eq,
    Deserialize,
    PartialEq,
    Ord,
    PartialOrd,
    AddAssign,
    SubAssign,
    Sub,
    Add,
)]
pub struct ResourceAmount(u64);

impl ResourceAmount {
    pub const ZERO: ResourceAmount = ResourceAmount(0);
    pub const MAX: ResourceAmount = ResourceAmount(MAX_RESOURCE_UNITS * FRACTIONS_PER_UNIT as u64);

    pub fn new(units: ResourceUnits, fractions: ResourceFractions) -> Self {
        assert!(fractions < FRACTIONS_PER_UNIT);
        assert!(units < MAX_RESOURCE_UNITS || (units == MAX_RESOURCE_UNITS && fractions == 0));
        ResourceAmount(units * FRACTIONS_PER_UNIT as u64 + fractions as u64)
    }

    pub fn new_units(units: ResourceUnits) -> Self {
        Self::new(units, 0)
    }

    pub fn new_fractions(fractions: ResourceFractions) -> Self {
        assert!(fractions < FRACTIONS_PER_UNIT);
        ResourceAmount(fractions as u64)
    }

    /// Returns `None` when `units` does not fit into the fixed point range.
    pub fn checked_units(units: ResourceUnits) -> Option<Self> {
        (units <= MAX_RESOURCE_UNITS).then(|| ResourceAmount(units * FRACTIONS_PER_UNIT as u64))
    }

    pub(crate) fn from_total_fractions(fractions: u64) -> Option<Self> {
        (fractions <= Self::MAX.0).then_some(ResourceAmount(fractions))
    }

    /// Converts a float to the nearest representable amount.
    /// Values below one fraction are negligible and yield zero, as do negative
    /// and non-finite inputs. Too large inputs saturate.
    pub fn from_float(value: f64) -> Self {
        if !value.is_finite() || value < 1.0 / FRACTIONS_PER_UNIT as f64 {
            return Self::ZERO;
        }
        let fractions = (value * FRACTIONS_PER_UNIT as f64).round();
        if fractions >= Self::MAX.0 as f64 {
            Self::MAX
        } else {
            ResourceAmount(fractions as u64)
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn units(&self) -> ResourceUnits {
        self.0 / FRACTIONS_PER_UNIT as u64
    }

    pub fn fractions(&self) -> ResourceFractions {
        (self.0 % FRACTIONS_PER_UNIT as u64) as ResourceFractions
    }

    pub fn total_fractions(&self) -> u64 {
        self.0
    }

    /// Sum that stops at [`ResourceAmount::MAX`].
    pub fn saturating_add(self, other: ResourceAmount) -> ResourceAmount {
        ResourceAmount(self.0.saturating_add(other.0).min(Self::MAX.0))
    }

    pub fn checked_sub(self, other: ResourceAmount) -> Option<ResourceAmount> {
        self.0.checked_sub(other.0).map(ResourceAmount)
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / FRACTIONS_PER_UNIT as f64
    }
}

impl From<ResourceUnits> for ResourceAmount {
    fn from(units: ResourceUnits) -> Self {
        Self::new_units(units)
    }
}

impl std::fmt::Display for ResourceAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let fractions = self.fractions();
        write!(f, "{}", self.units())?;
        if fractions != 0 {
            let num = format!("{:01$}", fractions, FRACTIONS_MAX_DIGITS);
            write!(f, ".{}", num.trim_end_matches('0'))?;
        }
        Ok(())
    }
}
