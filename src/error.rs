use thiserror::Error;

/// Misuse of [`BehaviorTreeBuilder`](crate::BehaviorTreeBuilder), reported from the
/// `end` or `build` call that detected it.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    #[error("end() called without an open composite to close")]
    UnbalancedEnd,
    #[error("the tree has no nodes")]
    EmptyTree,
    #[error("decorator {name:?} was closed without a child")]
    MissingChild { name: String },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
