use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use fxhash::FxBuildHasher;
use serde::{Deserialize, Serialize};

type FxHashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Hash map keyed by agent ids and resource names. Its iteration order is
/// unspecified, so anything observable must be sorted first.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Map<K: Eq + Hash, V>(FxHashMap<K, V>);

impl<K: Eq + Hash, V> Map<K, V> {
    pub fn new() -> Self {
        Map(FxHashMap::default())
    }
}

impl<K: Eq + Hash, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Deref for Map<K, V> {
    type Target = FxHashMap<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Eq + Hash, V> DerefMut for Map<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Map(iter.into_iter().collect())
    }
}

impl<'a, K: Eq + Hash, V> IntoIterator for &'a Map<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = hashbrown::hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
