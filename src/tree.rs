use crate::{error::SnapshotError, BehaviorNodeContainer, NodeSnapshot, Status};

/// A finished behavior tree. Its structure cannot change after
/// [`BehaviorTreeBuilder::build`](crate::BehaviorTreeBuilder::build).
///
/// The host decides how often to call [`tick`](Self::tick); the tree keeps no clock.
#[derive(Debug)]
pub struct BehaviorTree {
    root: BehaviorNodeContainer,
}

impl BehaviorTree {
    pub fn new(root: BehaviorNodeContainer) -> Self {
        Self { root }
    }

    pub fn tick(&mut self) -> Status {
        self.root.tick()
    }

    /// Drops all resume points and counters, so the next tick evaluates the tree
    /// from the top. Closures are not touched.
    pub fn reset(&mut self) {
        self.root.reset();
    }

    pub fn root(&self) -> &BehaviorNodeContainer {
        &self.root
    }

    pub fn find(&self, name: &str) -> Option<&BehaviorNodeContainer> {
        self.root.find(name)
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot::from(&self.root)
    }

    pub fn to_yaml(&self) -> Result<String, SnapshotError> {
        self.snapshot().to_yaml()
    }
}
