use std::num::IntErrorKind;

use thiserror::Error;

use crate::internal::admission::task::TaskDeclaration;
use crate::internal::common::resources::{
    CPU_RESOURCE_NAME, FRACTIONS_PER_UNIT, NETWORK_BANDWIDTH_RESOURCE_NAME, Resource,
    ResourceAmount, Resources, UNRESERVED_ROLE,
};

/// Label overriding the derived network bandwidth of a task.
pub const NETWORK_BANDWIDTH_RESOURCE_LABEL: &str = "NETWORK_BANDWIDTH_RESOURCE";

/// Bandwidth units split among tasks of an agent proportionally to their
/// share of the agent's CPUs. Does not depend on the bandwidth the agent
/// advertises.
pub const NETWORK_BANDWIDTH_POOL: u64 = 2000;

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AdmissionError {
    #[error("Invalid network bandwidth resource format. Should be an integer.")]
    InvalidFormat,
    #[error("Network bandwidth amount is out of range.")]
    OutOfRange,
    #[error("No CPU advertised by the slave. Cannot deduce network bandwidth.")]
    NoAgentCpu,
    #[error("No CPU declared in the task. Cannot deduce network bandwidth.")]
    NoTaskCpu,
}

/// Makes sure that `task` declares an unreserved network bandwidth resource.
///
/// An explicit declaration wins, then the `NETWORK_BANDWIDTH_RESOURCE` label,
/// otherwise the task gets the share of [`NETWORK_BANDWIDTH_POOL`] given by
/// its CPUs relative to the CPUs of the agent. On error the task is left
/// untouched.
pub fn enforce_bandwidth(
    agent_total: &Resources,
    task: &mut TaskDeclaration,
) -> Result<(), AdmissionError> {
    if task
        .resources
        .get(NETWORK_BANDWIDTH_RESOURCE_NAME, UNRESERVED_ROLE)
        .is_some()
    {
        return Ok(());
    }

    let bandwidth = match task.labels.get(NETWORK_BANDWIDTH_RESOURCE_LABEL) {
        Some(label) => {
            let amount = parse_bandwidth_label(label.value.as_deref())?;
            log::debug!("Task {} requests network bandwidth {amount}", task.id);
            amount
        }
        None => {
            let amount = derive_bandwidth(agent_total, &task.resources)?;
            log::debug!(
                "Network bandwidth {amount} derived for task {} from its CPU share",
                task.id
            );
            amount
        }
    };
    task.resources += Resource::scalar(NETWORK_BANDWIDTH_RESOURCE_NAME, bandwidth);
    Ok(())
}

fn parse_bandwidth_label(value: Option<&str>) -> Result<ResourceAmount, AdmissionError> {
    let value = value.ok_or(AdmissionError::InvalidFormat)?;
    // `u64::from_str` accepts a leading '+'
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AdmissionError::InvalidFormat);
    }
    let units = value.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => AdmissionError::OutOfRange,
        _ => AdmissionError::InvalidFormat,
    })?;
    ResourceAmount::checked_units(units).ok_or(AdmissionError::OutOfRange)
}

fn derive_bandwidth(
    agent_total: &Resources,
    task_resources: &Resources,
) -> Result<ResourceAmount, AdmissionError> {
    let agent_cpus = agent_total
        .unreserved_scalar(CPU_RESOURCE_NAME)
        .ok_or(AdmissionError::NoAgentCpu)?;
    let task_cpus = task_resources
        .scalar(CPU_RESOURCE_NAME)
        .ok_or(AdmissionError::NoTaskCpu)?;

    let fractions = task_cpus.total_fractions() as u128
        * NETWORK_BANDWIDTH_POOL as u128
        * FRACTIONS_PER_UNIT as u128
        / agent_cpus.total_fractions() as u128;
    u64::try_from(fractions)
        .ok()
        .and_then(ResourceAmount::from_total_fractions)
        .ok_or(AdmissionError::OutOfRange)
}
