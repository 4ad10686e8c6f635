use serde::{Deserialize, Serialize};

use crate::internal::common::ids::TaskId;
use crate::internal::common::resources::Resources;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub key: String,
    pub value: Option<String>,
}

/// Ordered bag of task labels. Keys are not required to be unique, lookups
/// return the first match.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Labels(Vec<Label>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<K: Into<String>>(&mut self, key: K, value: Option<String>) {
        self.0.push(Label {
            key: key.into(),
            value,
        });
    }

    pub fn get(&self, key: &str) -> Option<&Label> {
        self.0.iter().find(|label| label.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Labels(
            iter.into_iter()
                .map(|(key, value)| Label {
                    key: key.into(),
                    value: Some(value.into()),
                })
                .collect(),
        )
    }
}

/// Resources requested by a task together with its labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDeclaration {
    pub id: TaskId,
    pub name: Option<String>,
    pub resources: Resources,
    pub labels: Labels,
}

impl TaskDeclaration {
    pub fn new<I: Into<TaskId>>(id: I, resources: Resources) -> Self {
        TaskDeclaration {
            id: id.into(),
            name: None,
            resources,
            labels: Labels::new(),
        }
    }

    pub fn with_label<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.labels.push(key, Some(value.into()));
        self
    }
}
