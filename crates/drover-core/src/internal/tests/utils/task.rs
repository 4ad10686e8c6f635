use crate::internal::admission::{NETWORK_BANDWIDTH_RESOURCE_LABEL, TaskDeclaration};
use crate::internal::common::resources::Resource;
use crate::internal::tests::utils::resources::resources;

pub struct TaskBuilder {
    task: TaskDeclaration,
}

impl TaskBuilder {
    pub fn new(id: &str) -> Self {
        TaskBuilder {
            task: TaskDeclaration::new(id, Default::default()),
        }
    }

    pub fn resources(mut self, items: impl IntoIterator<Item = Resource>) -> Self {
        self.task.resources = resources(items);
        self
    }

    pub fn bandwidth_label(self, value: &str) -> Self {
        self.label(NETWORK_BANDWIDTH_RESOURCE_LABEL, value)
    }

    pub fn label(mut self, key: &str, value: &str) -> Self {
        self.task.labels.push(key, Some(value.to_string()));
        self
    }

    pub fn build(self) -> TaskDeclaration {
        self.task
    }
}
