use serde::{Deserialize, Serialize};

use crate::{BehaviorNode, BehaviorNodeContainer, Status};

fn single_child(child: &Option<BehaviorNodeContainer>) -> &[BehaviorNodeContainer] {
    match child {
        Some(child) => std::slice::from_ref(child),
        None => &[],
    }
}

/// Ticks children in order until one of them fails.
///
/// A child returning `Running` is remembered, and the next tick resumes from it
/// instead of starting over from the first child.
#[derive(Default)]
pub struct SequenceNode {
    children: Vec<BehaviorNodeContainer>,
    current_child: Option<usize>,
}

impl SequenceNode {
    pub fn new(children: Vec<BehaviorNodeContainer>) -> Self {
        Self {
            children,
            current_child: None,
        }
    }
}

impl BehaviorNode for SequenceNode {
    fn tick(&mut self) -> Status {
        let from = self.current_child.unwrap_or(0);
        for (i, node) in self.children[from..].iter_mut().enumerate() {
            match node.tick() {
                Status::Failure => {
                    self.current_child = None;
                    return Status::Failure;
                }
                Status::Running => {
                    self.current_child = Some(i + from);
                    return Status::Running;
                }
                Status::Success => (),
            }
        }
        self.current_child = None;
        Status::Success
    }

    fn kind(&self) -> &'static str {
        "Sequence"
    }

    fn children(&self) -> &[BehaviorNodeContainer] {
        &self.children
    }

    fn reset(&mut self) {
        self.current_child = None;
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Ticks children in order until one of them succeeds. Resumes a `Running` child
/// the same way [`SequenceNode`] does.
#[derive(Default)]
pub struct SelectorNode {
    children: Vec<BehaviorNodeContainer>,
    current_child: Option<usize>,
}

impl SelectorNode {
    pub fn new(children: Vec<BehaviorNodeContainer>) -> Self {
        Self {
            children,
            current_child: None,
        }
    }
}

impl BehaviorNode for SelectorNode {
    fn tick(&mut self) -> Status {
        let from = self.current_child.unwrap_or(0);
        for (i, node) in self.children[from..].iter_mut().enumerate() {
            match node.tick() {
                Status::Success => {
                    self.current_child = None;
                    return Status::Success;
                }
                Status::Running => {
                    self.current_child = Some(i + from);
                    return Status::Running;
                }
                Status::Failure => (),
            }
        }
        self.current_child = None;
        Status::Failure
    }

    fn kind(&self) -> &'static str {
        "Selector"
    }

    fn children(&self) -> &[BehaviorNodeContainer] {
        &self.children
    }

    fn reset(&mut self) {
        self.current_child = None;
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// How a [`ParallelNode`] turns the statuses of all its children into one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParallelPolicy {
    /// `Failure` if any child failed, else `Running` if any child is still running,
    /// else `Success`.
    #[default]
    RequireAll,
    /// `Success` if any child succeeded, else `Running` if any child is still
    /// running, else `Failure`.
    RequireOne,
}

impl ParallelPolicy {
    fn aggregate(self, succeeded: usize, failed: usize, running: usize) -> Status {
        match self {
            ParallelPolicy::RequireAll if failed > 0 => Status::Failure,
            ParallelPolicy::RequireOne if succeeded > 0 => Status::Success,
            _ if running > 0 => Status::Running,
            ParallelPolicy::RequireAll => Status::Success,
            ParallelPolicy::RequireOne => Status::Failure,
        }
    }
}

/// Ticks every child on every tick, in order, without short circuiting.
///
/// Nothing runs on another thread; the children are "parallel" only in the sense
/// that none of them can keep another from being ticked.
#[derive(Default)]
pub struct ParallelNode {
    children: Vec<BehaviorNodeContainer>,
    policy: ParallelPolicy,
}

impl ParallelNode {
    pub fn new(children: Vec<BehaviorNodeContainer>, policy: ParallelPolicy) -> Self {
        Self { children, policy }
    }

    pub fn policy(&self) -> ParallelPolicy {
        self.policy
    }
}

impl BehaviorNode for ParallelNode {
    fn tick(&mut self) -> Status {
        let (mut succeeded, mut failed, mut running) = (0, 0, 0);
        for node in &mut self.children {
            match node.tick() {
                Status::Success => succeeded += 1,
                Status::Failure => failed += 1,
                Status::Running => running += 1,
            }
        }
        self.policy.aggregate(succeeded, failed, running)
    }

    fn kind(&self) -> &'static str {
        "Parallel"
    }

    fn children(&self) -> &[BehaviorNodeContainer] {
        &self.children
    }

    fn reset(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Leaf running a host closure. Progress across ticks, if any, lives in whatever
/// the closure captures.
pub struct ActionNode {
    action: Box<dyn FnMut() -> Status>,
}

impl ActionNode {
    pub fn new(action: impl FnMut() -> Status + 'static) -> Self {
        Self {
            action: Box::new(action),
        }
    }
}

impl BehaviorNode for ActionNode {
    fn tick(&mut self) -> Status {
        (self.action)()
    }

    fn kind(&self) -> &'static str {
        "Action"
    }
}

/// Leaf mapping a predicate to `Success` or `Failure`. Never `Running`.
pub struct ConditionNode {
    predicate: Box<dyn FnMut() -> bool>,
}

impl ConditionNode {
    pub fn new(predicate: impl FnMut() -> bool + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl BehaviorNode for ConditionNode {
    fn tick(&mut self) -> Status {
        (self.predicate)().into()
    }

    fn kind(&self) -> &'static str {
        "Condition"
    }
}

#[derive(Default)]
pub struct InverterNode(pub(crate) Option<BehaviorNodeContainer>);

impl InverterNode {
    pub fn new(child: BehaviorNodeContainer) -> Self {
        Self(Some(child))
    }
}

impl BehaviorNode for InverterNode {
    fn tick(&mut self) -> Status {
        if let Some(ref mut node) = self.0 {
            node.tick().invert()
        } else {
            Status::Failure
        }
    }

    fn kind(&self) -> &'static str {
        "Inverter"
    }

    fn children(&self) -> &[BehaviorNodeContainer] {
        single_child(&self.0)
    }

    fn reset(&mut self) {
        self.0.iter_mut().for_each(BehaviorNodeContainer::reset);
    }
}

#[derive(Default)]
pub struct ForceSuccessNode(pub(crate) Option<BehaviorNodeContainer>);

impl ForceSuccessNode {
    pub fn new(child: BehaviorNodeContainer) -> Self {
        Self(Some(child))
    }
}

impl BehaviorNode for ForceSuccessNode {
    fn tick(&mut self) -> Status {
        if let Some(ref mut node) = self.0 {
            if let Status::Running = node.tick() {
                return Status::Running;
            }
            Status::Success
        } else {
            Status::Failure
        }
    }

    fn kind(&self) -> &'static str {
        "ForceSuccess"
    }

    fn children(&self) -> &[BehaviorNodeContainer] {
        single_child(&self.0)
    }

    fn reset(&mut self) {
        self.0.iter_mut().for_each(BehaviorNodeContainer::reset);
    }
}

#[derive(Default)]
pub struct ForceFailureNode(pub(crate) Option<BehaviorNodeContainer>);

impl ForceFailureNode {
    pub fn new(child: BehaviorNodeContainer) -> Self {
        Self(Some(child))
    }
}

impl BehaviorNode for ForceFailureNode {
    fn tick(&mut self) -> Status {
        if let Some(ref mut node) = self.0 {
            if let Status::Running = node.tick() {
                return Status::Running;
            }
        }
        Status::Failure
    }

    fn kind(&self) -> &'static str {
        "ForceFailure"
    }

    fn children(&self) -> &[BehaviorNodeContainer] {
        single_child(&self.0)
    }

    fn reset(&mut self) {
        self.0.iter_mut().for_each(BehaviorNodeContainer::reset);
    }
}

/// Runs its child until it has succeeded `n` times, reporting `Running` in between.
/// A failure of the child fails the node and starts the count over. With `n == 0`
/// the node succeeds without ticking the child.
pub struct RepeatNode {
    n: usize,
    remaining: Option<usize>,
    child: Option<BehaviorNodeContainer>,
}

impl RepeatNode {
    pub fn new(n: usize, child: BehaviorNodeContainer) -> Self {
        Self::with_child(n, Some(child))
    }

    pub(crate) fn with_child(n: usize, child: Option<BehaviorNodeContainer>) -> Self {
        Self {
            n,
            remaining: None,
            child,
        }
    }
}

impl BehaviorNode for RepeatNode {
    fn tick(&mut self) -> Status {
        let Some(child) = self.child.as_mut() else {
            return Status::Failure;
        };
        let current = self.remaining.unwrap_or(self.n);
        if current == 0 {
            self.remaining = None;
            return Status::Success;
        }
        match child.tick() {
            Status::Success if current == 1 => {
                self.remaining = None;
                Status::Success
            }
            Status::Success => {
                self.remaining = Some(current - 1);
                Status::Running
            }
            Status::Running => {
                self.remaining = Some(current);
                Status::Running
            }
            Status::Failure => {
                self.remaining = None;
                Status::Failure
            }
        }
    }

    fn kind(&self) -> &'static str {
        "Repeat"
    }

    fn children(&self) -> &[BehaviorNodeContainer] {
        single_child(&self.child)
    }

    fn reset(&mut self) {
        self.remaining = None;
        self.child.iter_mut().for_each(BehaviorNodeContainer::reset);
    }
}

/// Gives its child up to `n` attempts, reporting `Running` after each failed one.
/// A success of the child succeeds the node and starts the count over. With `n == 0`
/// the node fails without ticking the child.
pub struct RetryNode {
    n: usize,
    remaining: Option<usize>,
    child: Option<BehaviorNodeContainer>,
}

impl RetryNode {
    pub fn new(n: usize, child: BehaviorNodeContainer) -> Self {
        Self::with_child(n, Some(child))
    }

    pub(crate) fn with_child(n: usize, child: Option<BehaviorNodeContainer>) -> Self {
        Self {
            n,
            remaining: None,
            child,
        }
    }
}

impl BehaviorNode for RetryNode {
    fn tick(&mut self) -> Status {
        let Some(child) = self.child.as_mut() else {
            return Status::Failure;
        };
        let current = self.remaining.unwrap_or(self.n);
        if current == 0 {
            self.remaining = None;
            return Status::Failure;
        }
        match child.tick() {
            Status::Failure if current == 1 => {
                self.remaining = None;
                Status::Failure
            }
            Status::Failure => {
                self.remaining = Some(current - 1);
                Status::Running
            }
            Status::Running => {
                self.remaining = Some(current);
                Status::Running
            }
            Status::Success => {
                self.remaining = None;
                Status::Success
            }
        }
    }

    fn kind(&self) -> &'static str {
        "Retry"
    }

    fn children(&self) -> &[BehaviorNodeContainer] {
        single_child(&self.child)
    }

    fn reset(&mut self) {
        self.remaining = None;
        self.child.iter_mut().for_each(BehaviorNodeContainer::reset);
    }
}
