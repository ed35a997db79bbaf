//! Headless simulation loop wiring the world to the pure systems.

use lane_defence_core::{Command, Event, StatsReport};
use lane_defence_system_analytics::Analytics;
use lane_defence_world::{self as world, query, World};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::scenario::Scenario;

/// Outcome of a headless run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct RunSummary {
    /// Number of ticks simulated.
    pub(crate) ticks: u32,
    /// Statistics accumulated from the event stream.
    pub(crate) report: StatsReport,
    /// Enemies still registered when the run ended.
    pub(crate) live_enemies: usize,
}

/// Runs `scenario` to completion and summarises what happened.
pub(crate) fn run(scenario: &Scenario) -> RunSummary {
    let mut world = World::new();
    let mut spawning = scenario.spawning();
    let mut analytics = Analytics::new();
    let mut events = Vec::new();

    for command in scenario.setup_commands() {
        apply(&mut world, command, &mut events);
    }
    analytics.handle(&events);

    let dt = scenario.dt();
    let mut pending: Vec<Command> = Vec::new();
    for _ in 0..scenario.ticks {
        events.clear();
        for command in pending.drain(..) {
            apply(&mut world, command, &mut events);
        }
        apply(&mut world, Command::Tick { dt }, &mut events);

        if let Some(spawning) = spawning.as_mut() {
            spawning.handle(&events, &mut pending);
        }
        analytics.handle(&events);
    }

    let live_enemies = query::enemies(&world).len();
    info!(ticks = scenario.ticks, live_enemies, "simulation finished");

    RunSummary {
        ticks: scenario.ticks,
        report: *analytics.report(),
        live_enemies,
    }
}

fn apply(world: &mut World, command: Command, events: &mut Vec<Event>) {
    let start = events.len();
    world::apply(world, command, events);
    for event in &events[start..] {
        log_event(world, event);
    }
}

fn log_event(world: &World, event: &Event) {
    let tick = query::tick_index(world);
    match event {
        Event::EnemyReachedGoal { enemy } => info!(tick, enemy = enemy.get(), "enemy leaked"),
        Event::EnemyDied { enemy, cause } => {
            info!(tick, enemy = enemy.get(), ?cause, "enemy died");
        }
        Event::PathRejected {
            enemy,
            lane,
            reason,
        } => info!(
            tick,
            enemy = enemy.get(),
            lane = lane.get(),
            %reason,
            "path rejected"
        ),
        Event::TowerFired {
            tower,
            enemy,
            damage,
        } => debug!(
            tick,
            tower = tower.get(),
            enemy = enemy.get(),
            damage,
            "tower fired"
        ),
        other => trace!(tick, event = ?other, "event"),
    }
}
