#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Timer-driven spawning system responsible for emitting enemy spawn commands.

use std::time::Duration;

use glam::Vec3;
use lane_defence_core::{Command, EnemyConfig, Event, LaneId};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    origin: Vec3,
    lane: LaneId,
    enemy: EnemyConfig,
}

impl Config {
    /// Creates a configuration that spawns `enemy` at `origin` on `lane` once per interval.
    #[must_use]
    pub const fn new(
        spawn_interval: Duration,
        origin: Vec3,
        lane: LaneId,
        enemy: EnemyConfig,
    ) -> Self {
        Self {
            spawn_interval,
            origin,
            lane,
            enemy,
        }
    }
}

/// Pure system that emits a spawn command whenever its interval elapses.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    since_last_spawn: Duration,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            since_last_spawn: Duration::ZERO,
        }
    }

    /// Consumes world events and emits spawn commands.
    ///
    /// Each `Event::TimeAdvanced` adds to the elapsed time. Once the elapsed
    /// time exceeds the interval it restarts from zero and a single enemy is
    /// requested, so one long tick never produces a burst of spawns.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        if self.config.spawn_interval.is_zero() {
            return;
        }

        for event in events {
            let Event::TimeAdvanced { dt } = event else {
                continue;
            };

            self.since_last_spawn = self.since_last_spawn.saturating_add(*dt);
            if self.since_last_spawn > self.config.spawn_interval {
                self.since_last_spawn = Duration::ZERO;
                out.push(Command::SpawnEnemy {
                    origin: self.config.origin,
                    lane: Some(self.config.lane),
                    config: self.config.enemy,
                });
            }
        }
    }

    /// Time accumulated since the last spawn.
    #[must_use]
    pub const fn since_last_spawn(&self) -> Duration {
        self.since_last_spawn
    }
}
