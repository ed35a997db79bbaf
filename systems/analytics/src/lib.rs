#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Analytics system that folds world events into run statistics.

use lane_defence_core::{DeathCause, Event, StatsReport};

/// Pure analytics system that tallies spawns, kills, leaks, and shots.
#[derive(Debug, Default)]
pub struct Analytics {
    report: StatsReport,
    ticks_observed: u64,
}

impl Analytics {
    /// Creates a new analytics system with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events, updating the running report.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::TimeAdvanced { .. } => {
                    self.ticks_observed = self.ticks_observed.saturating_add(1);
                }
                Event::EnemySpawned { .. } => {
                    self.report.enemies_spawned = self.report.enemies_spawned.saturating_add(1);
                }
                Event::EnemyReachedGoal { .. } => {
                    self.report.enemies_leaked = self.report.enemies_leaked.saturating_add(1);
                }
                Event::EnemyDied { cause, .. } => match cause {
                    DeathCause::Killed => {
                        self.report.enemies_killed = self.report.enemies_killed.saturating_add(1);
                    }
                    DeathCause::EmptyPath | DeathCause::MissingWaypoint => {
                        self.report.enemies_discarded =
                            self.report.enemies_discarded.saturating_add(1);
                    }
                },
                Event::TowerFired { damage, .. } => {
                    self.report.shots_fired = self.report.shots_fired.saturating_add(1);
                    self.report.damage_dealt += damage;
                }
                _ => {}
            }
        }
    }

    /// Report accumulated so far.
    #[must_use]
    pub const fn report(&self) -> &StatsReport {
        &self.report
    }

    /// Number of ticks observed so far.
    #[must_use]
    pub const fn ticks_observed(&self) -> u64 {
        self.ticks_observed
    }
}
