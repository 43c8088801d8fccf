//! Supporting types for collaborator traits.

use serde::{Deserialize, Serialize};

/// Definition of a tool the model can call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool/function
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON Schema of the parameters this tool accepts
    pub parameters: serde_json::Value,
}

/// Health of a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Fully operational
    Healthy,
    /// Reachable but not fully usable
    Degraded {
        /// Description of the degradation
        message: String,
    },
    /// Not operational
    Unhealthy {
        /// Description of the problem
        message: String,
    },
}

impl HealthStatus {
    /// Whether the backend can serve requests.
    pub fn is_usable(&self) -> bool {
        !matches!(self, HealthStatus::Unhealthy { .. })
    }
}
