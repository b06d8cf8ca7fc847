use serde::Serialize;

use crate::{error::SnapshotError, BehaviorNodeContainer, Status};

/// A read-only copy of a tree's structure and the statuses of its last tick,
/// for debugging and visualization tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_result: Option<Status>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    pub fn to_yaml(&self) -> Result<String, SnapshotError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl From<&BehaviorNodeContainer> for NodeSnapshot {
    fn from(node: &BehaviorNodeContainer) -> Self {
        Self {
            name: node.name().to_owned(),
            kind: node.kind(),
            last_result: node.last_result(),
            children: node.children().iter().map(NodeSnapshot::from).collect(),
        }
    }
}
