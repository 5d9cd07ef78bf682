use thiserror::Error;

use crate::core::types::{GroupId, ModelId};

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Model not found in group {group}: {model}")]
    ModelNotFound { group: GroupId, model: ModelId },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Aura config error: {0}")]
    AuraConfigError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
