#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Defence.
//!
//! The world owns the live enemy registry, the placed towers, and the lane
//! table. Every mutation arrives as a [`Command`] through [`apply`], and every
//! observable change leaves as an [`Event`].

mod enemies;
mod lanes;
mod towers;

use lane_defence_core::{Command, EnemyId, Event, LaneId};
use tracing::{debug, warn};

pub use enemies::Enemy;
pub use lanes::LaneTable;
pub use towers::Tower;

use enemies::EnemyRegistry;
use towers::TowerRegistry;

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    enemies: EnemyRegistry,
    towers: TowerRegistry,
    lanes: LaneTable,
    tick_index: u64,
}

impl World {
    /// Creates an empty world with no lanes, enemies, or towers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enemies: EnemyRegistry::new(),
            towers: TowerRegistry::new(),
            lanes: LaneTable::new(),
            tick_index: 0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// A tick advances every enemy before any tower acts, and enemies that reached
/// a terminal phase are removed before towers scan for targets and again once
/// all towers have fired. Removals are therefore visible before the next tick.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureLane { lane, waypoints } => {
            let waypoints = world.lanes.configure(lane, waypoints);
            out_events.push(Event::LaneConfigured { lane, waypoints });
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            for enemy in world.enemies.as_mut_slice() {
                enemy.tick(dt, out_events);
            }
            world.enemies.sweep(out_events);

            world
                .towers
                .tick(dt, world.enemies.as_mut_slice(), out_events);
            world.enemies.sweep(out_events);
        }
        Command::SpawnEnemy {
            origin,
            lane,
            config,
        } => {
            let enemy = world.enemies.spawn(origin, config);
            out_events.push(Event::EnemySpawned {
                enemy,
                position: origin,
            });

            if let Some(lane) = lane {
                assign_path(world, enemy, lane, out_events);
            }
        }
        Command::AssignPath { enemy, lane } => assign_path(world, enemy, lane, out_events),
        Command::PlaceTower { position, config } => {
            let tower = world.towers.place(position, config);
            out_events.push(Event::TowerPlaced { tower, position });
        }
        Command::DamageEnemy { enemy, amount } => {
            let Some(target) = world.enemies.get_mut(enemy) else {
                debug!(enemy = enemy.get(), "ignoring damage for unknown enemy");
                return;
            };
            target.take_damage(amount, out_events);
            world.enemies.sweep(out_events);
        }
    }
}

fn assign_path(world: &mut World, enemy: EnemyId, lane: LaneId, out_events: &mut Vec<Event>) {
    let path = world.lanes.path(lane);
    let Some(target) = world.enemies.get_mut(enemy) else {
        debug!(enemy = enemy.get(), "ignoring path for unknown enemy");
        return;
    };

    match target.assign_path(path, out_events) {
        Ok(()) => {
            if target.is_alive() {
                out_events.push(Event::PathAssigned { enemy, lane });
            }
        }
        Err(reason) => {
            warn!(
                enemy = enemy.get(),
                lane = lane.get(),
                %reason,
                "path assignment rejected"
            );
            out_events.push(Event::PathRejected {
                enemy,
                lane,
                reason,
            });
        }
    }

    world.enemies.sweep(out_events);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::sync::Arc;

    use super::{Enemy, Tower, World};
    use lane_defence_core::{EnemyId, EnemyView, LaneId, Path, TowerView};

    /// Number of ticks the world has processed.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Live enemies in spawn order, the order towers scan them in.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        world.enemies.as_slice()
    }

    /// Looks up a live enemy by identifier.
    #[must_use]
    pub fn enemy(world: &World, enemy: EnemyId) -> Option<&Enemy> {
        world.enemies.get(enemy)
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .as_slice()
                .iter()
                .map(Enemy::snapshot)
                .collect(),
        )
    }

    /// Towers in placement order.
    #[must_use]
    pub fn towers(world: &World) -> &[Tower] {
        world.towers.as_slice()
    }

    /// Captures a read-only view of the placed towers.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(
            world
                .towers
                .as_slice()
                .iter()
                .map(Tower::snapshot)
                .collect(),
        )
    }

    /// Path currently published for `lane`, if any.
    #[must_use]
    pub fn lane(world: &World, lane: LaneId) -> Option<Arc<Path>> {
        world.lanes.path(lane)
    }
}
