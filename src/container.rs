use std::borrow::Cow;

use tracing::trace;

use crate::{BehaviorNode, Status};

/// A node together with its name and the status it returned on its last tick.
///
/// Every node in a tree lives in one of these. The name has no effect on evaluation.
pub struct BehaviorNodeContainer {
    pub(crate) name: Cow<'static, str>,
    pub(crate) node: Box<dyn BehaviorNode>,
    pub(crate) last_result: Option<Status>,
}

impl BehaviorNodeContainer {
    pub fn new(name: impl Into<Cow<'static, str>>, node: impl BehaviorNode + 'static) -> Self {
        Self::new_raw(name, Box::new(node))
    }

    pub fn new_raw(name: impl Into<Cow<'static, str>>, node: Box<dyn BehaviorNode>) -> Self {
        Self {
            name: name.into(),
            node,
            last_result: None,
        }
    }

    pub fn tick(&mut self) -> Status {
        let status = self.node.tick();
        trace!(node = %self.name, kind = self.node.kind(), ?status, "tick");
        self.last_result = Some(status);
        status
    }

    pub fn reset(&mut self) {
        self.last_result = None;
        self.node.reset();
    }

    pub fn children(&self) -> &[BehaviorNodeContainer] {
        self.node.children()
    }

    pub fn last_result(&self) -> Option<Status> {
        self.last_result
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    /// Depth-first search for the first node called `name`, this one included.
    pub fn find(&self, name: &str) -> Option<&BehaviorNodeContainer> {
        if self.name == name {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }
}

impl std::fmt::Debug for BehaviorNodeContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorNodeContainer")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("last_result", &self.last_result)
            .field("children", &self.children())
            .finish()
    }
}
