use thiserror::Error;

use crate::internal::common::ids::AgentId;

#[derive(Debug, Error)]
pub enum DroverError {
    #[error("Agent {0} is not registered")]
    UnknownAgent(AgentId),
    #[error("Agent {0} is already registered")]
    AgentAlreadyExists(AgentId),
    #[error("Error: {0}")]
    GenericError(String),
}
