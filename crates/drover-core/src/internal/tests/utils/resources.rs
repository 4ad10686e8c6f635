use crate::internal::common::resources::{
    CPU_RESOURCE_NAME, MEM_RESOURCE_NAME, NETWORK_BANDWIDTH_RESOURCE_NAME, Resource,
    ResourceAmount, Resources,
};

pub fn scalar(name: &str, value: f64) -> Resource {
    Resource::scalar(name, ResourceAmount::from_float(value))
}

pub fn cpus(value: f64) -> Resource {
    scalar(CPU_RESOURCE_NAME, value)
}

pub fn mem(value: f64) -> Resource {
    scalar(MEM_RESOURCE_NAME, value)
}

pub fn bandwidth(value: f64) -> Resource {
    scalar(NETWORK_BANDWIDTH_RESOURCE_NAME, value)
}

pub fn resources(items: impl IntoIterator<Item = Resource>) -> Resources {
    items.into_iter().collect()
}
