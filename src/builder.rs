use std::borrow::Cow;

use tracing::{debug, warn};

use crate::{
    error::BuildError, nodes::*, BehaviorNode, BehaviorNodeContainer, BehaviorTree, NumChildren,
    Status,
};

/// The kind of node an open frame turns into when it is closed.
#[derive(Debug, Clone, Copy)]
enum FrameKind {
    Sequence,
    Selector,
    Parallel(ParallelPolicy),
    Inverter,
    ForceSuccess,
    ForceFailure,
    Repeat(usize),
    Retry(usize),
}

impl FrameKind {
    fn max_children(self) -> NumChildren {
        match self {
            Self::Sequence | Self::Selector | Self::Parallel(_) => NumChildren::Infinite,
            _ => NumChildren::Finite(1),
        }
    }
}

/// A composite or decorator that is still receiving children.
///
/// Children are collected here and handed to the node only when the frame is closed,
/// so the node types never need an `add_child` method and the finished tree cannot
/// grow.
struct Frame {
    name: Cow<'static, str>,
    kind: FrameKind,
    children: Vec<BehaviorNodeContainer>,
}

impl Frame {
    fn new(name: Cow<'static, str>, kind: FrameKind) -> Self {
        Self {
            name,
            kind,
            children: vec![],
        }
    }

    fn is_full(&self) -> bool {
        NumChildren::Finite(self.children.len()) >= self.kind.max_children()
    }

    fn lacks_child(&self) -> bool {
        self.kind.max_children() == NumChildren::Finite(1) && self.children.is_empty()
    }

    fn close(self) -> BehaviorNodeContainer {
        let mut children = self.children;
        let node: Box<dyn BehaviorNode> = match self.kind {
            FrameKind::Sequence => Box::new(SequenceNode::new(children)),
            FrameKind::Selector => Box::new(SelectorNode::new(children)),
            FrameKind::Parallel(policy) => Box::new(ParallelNode::new(children, policy)),
            FrameKind::Inverter => Box::new(InverterNode(children.pop())),
            FrameKind::ForceSuccess => Box::new(ForceSuccessNode(children.pop())),
            FrameKind::ForceFailure => Box::new(ForceFailureNode(children.pop())),
            FrameKind::Repeat(n) => Box::new(RepeatNode::with_child(n, children.pop())),
            FrameKind::Retry(n) => Box::new(RetryNode::with_child(n, children.pop())),
        };
        BehaviorNodeContainer::new_raw(self.name, node)
    }
}

/// Builds a [`BehaviorTree`] from a flat chain of calls.
///
/// The builder keeps a stack of open frames. Composite calls (`sequence`, `selector`,
/// `parallel`) and decorator calls push a frame, leaf calls (`action`, `condition`,
/// `node`) append to the frame on top, and `end` pops the top frame and appends the
/// finished node to the frame below it. The bottom of the stack is the implicit root
/// `Sequence`, which can never be popped.
///
/// Decorators take exactly one child, so their frame is popped automatically as soon
/// as that child arrives. `end` always closes the innermost open composite.
///
/// ```rust
/// # use fluent_behavior_tree::{BehaviorTreeBuilder, Status};
/// let tree = BehaviorTreeBuilder::new()
///     .sequence_named("outer")
///         .action(|| Status::Success)
///         .inverter()
///             .condition(|| false)
///         .sequence_named("inner")
///             .action(|| Status::Success)
///     .build()?;
///
/// let outer = &tree.root().children()[0];
/// assert_eq!(outer.children().len(), 3);
/// # Ok::<(), fluent_behavior_tree::BuildError>(())
/// ```
///
/// # Discussion
///
/// Misuse is reported from `end` and `build`, the only two calls that can observe
/// it, so every other call returns the builder by value and chains without `?`.
/// `build` consumes the builder; a spent builder cannot be touched again.
pub struct BehaviorTreeBuilder {
    root: Frame,
    stack: Vec<Frame>,
}

impl Default for BehaviorTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorTreeBuilder {
    pub fn new() -> Self {
        Self {
            root: Frame::new("root".into(), FrameKind::Sequence),
            stack: vec![],
        }
    }

    /// Number of frames opened and not yet closed, not counting the root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn sequence(self) -> Self {
        self.sequence_named("Sequence")
    }

    pub fn sequence_named(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.open(name.into(), FrameKind::Sequence)
    }

    pub fn selector(self) -> Self {
        self.selector_named("Selector")
    }

    pub fn selector_named(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.open(name.into(), FrameKind::Selector)
    }

    /// Opens a [`ParallelNode`] with the default [`ParallelPolicy::RequireAll`].
    pub fn parallel(self) -> Self {
        self.parallel_named("Parallel")
    }

    pub fn parallel_named(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.parallel_with(name, ParallelPolicy::default())
    }

    pub fn parallel_with(
        self,
        name: impl Into<Cow<'static, str>>,
        policy: ParallelPolicy,
    ) -> Self {
        self.open(name.into(), FrameKind::Parallel(policy))
    }

    pub fn inverter(self) -> Self {
        self.inverter_named("Inverter")
    }

    pub fn inverter_named(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.open(name.into(), FrameKind::Inverter)
    }

    pub fn force_success(self) -> Self {
        self.force_success_named("ForceSuccess")
    }

    pub fn force_success_named(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.open(name.into(), FrameKind::ForceSuccess)
    }

    pub fn force_failure(self) -> Self {
        self.force_failure_named("ForceFailure")
    }

    pub fn force_failure_named(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.open(name.into(), FrameKind::ForceFailure)
    }

    /// Opens a [`RepeatNode`] that succeeds once its child has succeeded `n` times.
    ///
    /// With `n == 0` the node succeeds on every tick without ever ticking its child.
    pub fn repeat(self, n: usize) -> Self {
        self.repeat_named("Repeat", n)
    }

    /// Named [`repeat`](Self::repeat); `n == 0` never ticks the child either.
    pub fn repeat_named(self, name: impl Into<Cow<'static, str>>, n: usize) -> Self {
        self.open(name.into(), FrameKind::Repeat(n))
    }

    /// Opens a [`RetryNode`] that gives the child up to `n` attempts to succeed.
    ///
    /// With `n == 0` the node fails on every tick without ever ticking its child.
    pub fn retry(self, n: usize) -> Self {
        self.retry_named("Retry", n)
    }

    /// Named [`retry`](Self::retry); `n == 0` never ticks the child either.
    pub fn retry_named(self, name: impl Into<Cow<'static, str>>, n: usize) -> Self {
        self.open(name.into(), FrameKind::Retry(n))
    }

    /// Appends an action leaf. The closure is not called until the tree is ticked.
    pub fn action(self, action: impl FnMut() -> Status + 'static) -> Self {
        self.action_named("Action", action)
    }

    pub fn action_named(
        self,
        name: impl Into<Cow<'static, str>>,
        action: impl FnMut() -> Status + 'static,
    ) -> Self {
        self.append(BehaviorNodeContainer::new(name, ActionNode::new(action)))
    }

    pub fn condition(self, predicate: impl FnMut() -> bool + 'static) -> Self {
        self.condition_named("Condition", predicate)
    }

    pub fn condition_named(
        self,
        name: impl Into<Cow<'static, str>>,
        predicate: impl FnMut() -> bool + 'static,
    ) -> Self {
        let node = ConditionNode::new(predicate);
        self.append(BehaviorNodeContainer::new(name, node))
    }

    /// Appends a host-defined node. Any children it has are its own business; the
    /// builder does not push it.
    pub fn node(
        self,
        name: impl Into<Cow<'static, str>>,
        node: impl BehaviorNode + 'static,
    ) -> Self {
        self.append(BehaviorNodeContainer::new(name, node))
    }

    /// Closes the innermost open composite.
    pub fn end(mut self) -> Result<Self, BuildError> {
        let Some(frame) = self.stack.pop() else {
            warn!("end() called with only the root open");
            return Err(BuildError::UnbalancedEnd);
        };
        if frame.lacks_child() {
            warn!(frame = %frame.name, "decorator closed without a child");
            return Err(BuildError::MissingChild {
                name: frame.name.to_string(),
            });
        }
        debug!(frame = %frame.name, depth = self.stack.len(), "close");
        let node = frame.close();
        Ok(self.append(node))
    }

    /// Closes every frame that is still open and returns the finished tree.
    pub fn build(mut self) -> Result<BehaviorTree, BuildError> {
        while !self.stack.is_empty() {
            self = self.end()?;
        }
        if self.root.children.is_empty() {
            warn!("build() called on an empty builder");
            return Err(BuildError::EmptyTree);
        }
        debug!(children = self.root.children.len(), "tree built");
        Ok(BehaviorTree::new(self.root.close()))
    }

    fn open(mut self, name: Cow<'static, str>, kind: FrameKind) -> Self {
        debug!(frame = %name, ?kind, depth = self.stack.len() + 1, "open");
        self.stack.push(Frame::new(name, kind));
        self
    }

    fn top(&mut self) -> &mut Frame {
        self.stack.last_mut().unwrap_or(&mut self.root)
    }

    fn append(mut self, node: BehaviorNodeContainer) -> Self {
        self.top().children.push(node);
        // A decorator that just got its child is done; closing it hands its node to
        // the frame below, which may be a decorator as well.
        while self.stack.last().map_or(false, Frame::is_full) {
            if let Some(frame) = self.stack.pop() {
                debug!(frame = %frame.name, depth = self.stack.len(), "close");
                let node = frame.close();
                self.top().children.push(node);
            }
        }
        self
    }
}
