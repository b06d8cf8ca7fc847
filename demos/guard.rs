//! A guard that patrols until it spots an intruder, then chases it down.
//!
//! Run with `RUST_LOG=fluent_behavior_tree=trace cargo run --example guard` to see
//! every node tick.

use ::fluent_behavior_tree::{BehaviorTreeBuilder, Status};
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Guard {
    health: Cell<u32>,
    intruder_distance: Cell<Option<u32>>,
    waypoint: Cell<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let guard = Rc::new(Guard::default());
    guard.health.set(10);

    let (low_health, spotted, chase, patrol) =
        (guard.clone(), guard.clone(), guard.clone(), guard.clone());

    #[rustfmt::skip]
    let mut tree = BehaviorTreeBuilder::new()
        .selector_named("Guard")
            .sequence_named("Flee")
                .condition_named("Low Health", move || low_health.health.get() < 3)
                .action_named("Run Away", || {
                    println!("Fleeing!");
                    Status::Success
                })
            .end()?
            .sequence_named("Chase")
                .condition_named("Intruder Spotted", move || {
                    spotted.intruder_distance.get().is_some()
                })
                .action_named("Close In", move || match chase.intruder_distance.get() {
                    Some(0) => {
                        println!("Caught the intruder");
                        chase.intruder_distance.set(None);
                        Status::Success
                    }
                    Some(d) => {
                        println!("Intruder {} steps away", d);
                        chase.intruder_distance.set(Some(d - 1));
                        Status::Running
                    }
                    None => Status::Failure,
                })
            .end()?
            .action_named("Patrol", move || {
                let next = (patrol.waypoint.get() + 1) % 4;
                patrol.waypoint.set(next);
                println!("Patrolling to waypoint {}", next);
                Status::Success
            })
        .build()?;

    for turn in 0..8 {
        if turn == 2 {
            guard.intruder_distance.set(Some(3));
        }
        let status = tree.tick();
        tracing::info!(turn, ?status, "ticked");
    }

    guard.health.set(1);
    tree.tick();

    println!("{}", tree.to_yaml()?);
    Ok(())
}
