//! Tower target acquisition, firing, and the tower registry.

use std::time::Duration;

use glam::Vec3;
use lane_defence_core::{EnemyId, Event, TowerConfig, TowerId, TowerSnapshot};
use tracing::debug;

use crate::Enemy;

/// Stationary tower that locks onto one enemy at a time and fires on a cooldown.
#[derive(Clone, Debug)]
pub struct Tower {
    id: TowerId,
    position: Vec3,
    config: TowerConfig,
    cooldown_remaining: Duration,
    target: Option<EnemyId>,
}

impl Tower {
    /// Creates an idle tower whose weapon is ready to fire.
    #[must_use]
    pub fn new(id: TowerId, position: Vec3, config: TowerConfig) -> Self {
        Self {
            id,
            position,
            config,
            cooldown_remaining: Duration::ZERO,
            target: None,
        }
    }

    /// Runs one step of the acquisition and firing loop against `enemies`.
    ///
    /// A held target stays engaged while it is alive and strictly closer than
    /// the tower's range. Otherwise the target is dropped and `enemies` is
    /// scanned in order for the first live enemy within range (inclusive);
    /// the step is spent acquiring and no shot is fired. Targets are looked up
    /// by identifier every step, so the tower never keeps an enemy alive.
    pub fn tick(&mut self, dt: Duration, enemies: &mut [Enemy], out: &mut Vec<Event>) {
        let origin = self.position;
        let range = self.config.range;
        let engaged = self.target.filter(|target| {
            enemies.iter().any(|enemy| {
                enemy.id() == *target
                    && enemy.is_alive()
                    && origin.distance(enemy.position()) < range
            })
        });

        match engaged {
            Some(target) => self.engage(target, dt, enemies, out),
            None => self.reacquire(enemies, out),
        }
    }

    /// Identifier allocated to the tower.
    #[must_use]
    pub const fn id(&self) -> TowerId {
        self.id
    }

    /// Fixed location of the tower.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Combat parameters of the tower.
    #[must_use]
    pub const fn config(&self) -> TowerConfig {
        self.config
    }

    /// Time left before the tower may fire again.
    #[must_use]
    pub const fn cooldown_remaining(&self) -> Duration {
        self.cooldown_remaining
    }

    /// Enemy the tower currently tracks.
    #[must_use]
    pub const fn target(&self) -> Option<EnemyId> {
        self.target
    }

    /// Captures an immutable snapshot of the tower.
    #[must_use]
    pub fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            position: self.position,
            config: self.config,
            cooldown_remaining: self.cooldown_remaining,
            target: self.target,
        }
    }

    fn engage(
        &mut self,
        target: EnemyId,
        dt: Duration,
        enemies: &mut [Enemy],
        out: &mut Vec<Event>,
    ) {
        if !self.cooldown_remaining.is_zero() {
            self.cooldown_remaining = self.cooldown_remaining.saturating_sub(dt);
            return;
        }

        let Some(enemy) = enemies.iter_mut().find(|enemy| enemy.id() == target) else {
            return;
        };

        debug!(
            tower = self.id.get(),
            enemy = target.get(),
            damage = self.config.damage,
            "firing at target"
        );
        out.push(Event::TowerFired {
            tower: self.id,
            enemy: target,
            damage: self.config.damage,
        });
        enemy.take_damage(self.config.damage, out);
        self.cooldown_remaining = self.config.cooldown;
    }

    fn reacquire(&mut self, enemies: &[Enemy], out: &mut Vec<Event>) {
        if let Some(lost) = self.target.take() {
            out.push(Event::TargetLost {
                tower: self.id,
                enemy: lost,
            });
        }

        let origin = self.position;
        let range = self.config.range;
        self.target = enemies
            .iter()
            .find(|enemy| enemy.is_alive() && origin.distance(enemy.position()) <= range)
            .map(Enemy::id);

        if let Some(enemy) = self.target {
            debug!(
                tower = self.id.get(),
                enemy = enemy.get(),
                "found a new target"
            );
            out.push(Event::TargetAcquired {
                tower: self.id,
                enemy,
            });
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: Vec<Tower>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Places a tower, returning the identifier allocated to it.
    pub(crate) fn place(&mut self, position: Vec3, config: TowerConfig) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().wrapping_add(1));
        self.entries.push(Tower::new(id, position, config));
        id
    }

    pub(crate) fn as_slice(&self) -> &[Tower] {
        &self.entries
    }

    /// Runs every tower's loop once, in placement order.
    pub(crate) fn tick(&mut self, dt: Duration, enemies: &mut [Enemy], out: &mut Vec<Event>) {
        for tower in &mut self.entries {
            tower.tick(dt, enemies, out);
        }
    }
}
