//! # fluent-behavior-tree
//!
//! A behavior tree engine with a fluent builder.
//!
//!
//! ## Overview
//!
//! A behavior tree composes decision logic out of small nodes: conditions and
//! actions at the leaves, and control flow nodes (`Sequence`, `Selector`,
//! `Parallel` and a handful of decorators) above them.
//! The host ticks the tree once per update, and the tree reports one of three
//! [`Status`] values: `Success`, `Failure` or `Running`.
//!
//! `Running` means the tree has not finished what it started.
//! Nothing is suspended between ticks; the call stack unwinds completely every
//! time, and the next tick picks up where the previous one stopped because each
//! `Sequence` and `Selector` remembers which child was still running.
//!
//!
//! ## How it looks like
//!
//! Leaves are plain closures. Any state they need is whatever they capture.
//!
//! ```rust
//! use fluent_behavior_tree::{BehaviorTreeBuilder, Status};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let stunned = Rc::new(Cell::new(false));
//! let steps = Rc::new(Cell::new(0));
//!
//! let mut tree = BehaviorTreeBuilder::new()
//!     .selector()
//!         .condition_named("Stunned", {
//!             let stunned = stunned.clone();
//!             move || stunned.get()
//!         })
//!         .sequence_named("Walk")
//!             .action({
//!                 let steps = steps.clone();
//!                 move || {
//!                     steps.set(steps.get() + 1);
//!                     Status::Success
//!                 }
//!             })
//!         .end()?
//!     .build()?;
//!
//! assert_eq!(tree.tick(), Status::Success);
//! assert_eq!(steps.get(), 1);
//!
//! stunned.set(true);
//! assert_eq!(tree.tick(), Status::Success);
//! assert_eq!(steps.get(), 1);
//! # Ok::<(), fluent_behavior_tree::BuildError>(())
//! ```
//!
//! Each composite call opens a new level of nesting and `end()` closes it.
//! `build()` closes whatever is still open, so trailing `end()` calls can be left out.
//! Every tree has an implicit root `Sequence` named `root` that the top level
//! nodes are attached to.
//!
//!
//! ## Node types
//!
//! * `Sequence` ticks its children in order until one fails.
//! * `Selector` ticks its children in order until one succeeds.
//! * `Parallel` ticks every child on every tick and combines the results with a
//!   [`ParallelPolicy`].
//! * `Inverter`, `ForceSuccess`, `ForceFailure`, `Repeat` and `Retry` wrap exactly
//!   one child. They close themselves as soon as the child is added.
//! * `Action` and `Condition` wrap host closures.
//!
//! Custom node types implement [`BehaviorNode`] and are added with
//! [`BehaviorTreeBuilder::node`].
//!
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `trace` for every node tick, `debug` for
//! builder stack changes and `warn` for builder misuse. Installing a subscriber
//! is up to the host.

mod builder;
mod container;
pub mod error;
mod nodes;
mod snapshot;
mod status;
mod tree;

pub use crate::builder::BehaviorTreeBuilder;
pub use crate::container::BehaviorNodeContainer;
pub use crate::error::{BuildError, SnapshotError};
pub use crate::nodes::{
    ActionNode, ConditionNode, ForceFailureNode, ForceSuccessNode, InverterNode, ParallelNode,
    ParallelPolicy, RepeatNode, RetryNode, SelectorNode, SequenceNode,
};
pub use crate::snapshot::NodeSnapshot;
pub use crate::status::Status;
pub use crate::tree::BehaviorTree;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(crate) enum NumChildren {
    Finite(usize),
    Infinite,
}

impl PartialOrd for NumChildren {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(match (self, other) {
            (NumChildren::Finite(_), NumChildren::Infinite) => std::cmp::Ordering::Less,
            (NumChildren::Infinite, NumChildren::Finite(_)) => std::cmp::Ordering::Greater,
            (NumChildren::Finite(lhs), NumChildren::Finite(rhs)) => lhs.cmp(rhs),
            (NumChildren::Infinite, NumChildren::Infinite) => return None,
        })
    }
}

pub trait BehaviorNode {
    fn tick(&mut self) -> Status;

    /// Name of the node type. Used as the default node name and in snapshots.
    fn kind(&self) -> &'static str {
        "Node"
    }

    fn children(&self) -> &[BehaviorNodeContainer] {
        &[]
    }

    /// Forget any progress carried over from earlier ticks, so that the next tick
    /// starts from scratch. Nodes that keep no state between ticks can ignore it.
    fn reset(&mut self) {}
}
