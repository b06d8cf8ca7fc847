use fluent_behavior_tree::{BehaviorTree, BehaviorTreeBuilder, NodeSnapshot, ParallelPolicy, Status};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// World state shared between the test and the leaf closures.
#[derive(Default)]
struct Agent {
    stunned: Cell<bool>,
    carrying_flag: Cell<bool>,
    distance_to_flag: Cell<u32>,
    log: RefCell<Vec<&'static str>>,
}

impl Agent {
    fn record(&self, what: &'static str) {
        self.log.borrow_mut().push(what);
    }

    fn take_log(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

#[rustfmt::skip]
fn flag_runner(agent: &Rc<Agent>) -> anyhow::Result<BehaviorTree> {
    let stunned = agent.clone();
    let not_carrying = agent.clone();
    let chase = agent.clone();
    let has_flag = agent.clone();
    let score = agent.clone();
    let idle = agent.clone();

    let tree = BehaviorTreeBuilder::new()
        .selector()
            .condition_named("Stunned", move || stunned.stunned.get())
            .sequence_named("Capture Flag")
                .condition_named("Not Carrying Flag", move || !not_carrying.carrying_flag.get())
                .action_named("Chase Flag", move || {
                    chase.record("chase");
                    let distance = chase.distance_to_flag.get();
                    if distance > 0 {
                        chase.distance_to_flag.set(distance - 1);
                        Status::Running
                    } else {
                        chase.carrying_flag.set(true);
                        Status::Success
                    }
                })
            .end()?
            .sequence_named("Score")
                .condition_named("Has Flag", move || has_flag.carrying_flag.get())
                .action(move || {
                    score.record("score");
                    score.carrying_flag.set(false);
                    Status::Success
                })
            .end()?
            .action_named("Return To Origin", move || {
                idle.record("idle");
                Status::Success
            })
        .build()?;
    Ok(tree)
}

#[test]
fn test_flag_runner() -> anyhow::Result<()> {
    let agent = Rc::new(Agent::default());
    agent.distance_to_flag.set(2);
    let mut tree = flag_runner(&agent)?;

    assert_eq!(tree.tick(), Status::Running);
    assert_eq!(tree.tick(), Status::Running);
    assert_eq!(agent.take_log(), vec!["chase", "chase"]);

    // The chase resumes even though the stun check comes first in the selector
    agent.stunned.set(true);
    assert_eq!(tree.tick(), Status::Success);
    assert_eq!(agent.take_log(), vec!["chase"]);
    assert!(agent.carrying_flag.get());

    // A fresh evaluation sees the stun
    assert_eq!(tree.tick(), Status::Success);
    assert!(agent.take_log().is_empty());

    agent.stunned.set(false);
    assert_eq!(tree.tick(), Status::Success);
    assert_eq!(agent.take_log(), vec!["score"]);
    Ok(())
}

#[test]
fn test_reset_abandons_running_branch() -> anyhow::Result<()> {
    let agent = Rc::new(Agent::default());
    agent.distance_to_flag.set(5);
    let mut tree = flag_runner(&agent)?;

    assert_eq!(tree.tick(), Status::Running);
    agent.take_log();

    agent.stunned.set(true);
    tree.reset();
    assert_eq!(tree.tick(), Status::Success);
    assert!(agent.take_log().is_empty());
    assert_eq!(
        tree.find("Capture Flag").and_then(|node| node.last_result()),
        None
    );
    Ok(())
}

#[test]
fn test_running_child_is_resumed_not_restarted() -> anyhow::Result<()> {
    let calls = Rc::new(RefCell::new(vec![]));
    let (a, b, c) = (calls.clone(), calls.clone(), calls.clone());
    let mut pending = 2;

    let mut tree = BehaviorTreeBuilder::new()
        .action(move || {
            a.borrow_mut().push("a");
            Status::Success
        })
        .action(move || {
            b.borrow_mut().push("b");
            if pending > 0 {
                pending -= 1;
                Status::Running
            } else {
                Status::Success
            }
        })
        .action(move || {
            c.borrow_mut().push("c");
            Status::Success
        })
        .build()?;

    let statuses: Vec<_> = (0..3).map(|_| tree.tick()).collect();
    assert_eq!(
        statuses,
        vec![Status::Running, Status::Running, Status::Success]
    );
    assert_eq!(*calls.borrow(), vec!["a", "b", "b", "b", "c"]);
    Ok(())
}

#[test]
fn test_snapshot() -> anyhow::Result<()> {
    let mut tree = BehaviorTreeBuilder::new()
        .parallel_named("both")
        .condition_named("ready", || true)
        .action_named("work", || Status::Running)
        .build()?;

    let before = tree.snapshot();
    assert_eq!(before.name, "root");
    assert_eq!(before.last_result, None);

    assert_eq!(tree.tick(), Status::Running);
    let after = tree.snapshot();
    let both = &after.children[0];
    assert_eq!(both.kind, "Parallel");
    assert_eq!(
        both.children
            .iter()
            .map(|c| (c.name.as_str(), c.last_result))
            .collect::<Vec<_>>(),
        vec![
            ("ready", Some(Status::Success)),
            ("work", Some(Status::Running)),
        ]
    );

    let yaml = tree.to_yaml()?;
    assert!(yaml.contains("name: both"));
    assert!(yaml.contains("kind: Parallel"));
    assert!(yaml.contains("last_result: Running"));
    Ok(())
}

#[test]
fn test_snapshot_of_leaf_has_no_children() {
    let leaf = NodeSnapshot {
        name: "leaf".to_owned(),
        kind: "Action",
        last_result: None,
        children: vec![],
    };
    let yaml = leaf.to_yaml().expect("snapshot should serialize");
    assert!(!yaml.contains("children"));
    assert!(!yaml.contains("last_result"));
}

#[derive(Deserialize)]
struct SquadConfig {
    #[serde(default)]
    policy: ParallelPolicy,
}

#[test]
fn test_policy_from_config() -> anyhow::Result<()> {
    let config: SquadConfig = serde_yaml::from_str("policy: RequireOne")?;
    assert_eq!(config.policy, ParallelPolicy::RequireOne);

    let config: SquadConfig = serde_yaml::from_str("{}")?;
    assert_eq!(config.policy, ParallelPolicy::RequireAll);

    let mut tree = BehaviorTreeBuilder::new()
        .parallel_with("squad", config.policy)
        .action(|| Status::Success)
        .action(|| Status::Failure)
        .build()?;
    assert_eq!(tree.tick(), Status::Failure);
    Ok(())
}
