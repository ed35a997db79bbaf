//! Enemy waypoint traversal and the live enemy registry.

use std::{sync::Arc, time::Duration};

use glam::Vec3;
use lane_defence_core::{
    DeathCause, EnemyConfig, EnemyId, EnemyPhase, EnemySnapshot, Event, Health, InvalidPathError,
    LaneId, Path, ARRIVAL_MARGIN,
};
use tracing::{debug, trace, warn};

/// Enemy that walks a lane path one waypoint at a time.
///
/// Enemies keep the height they were spawned at: waypoints only steer the
/// horizontal X/Z coordinates, so paths may be authored at any elevation.
#[derive(Clone, Debug)]
pub struct Enemy {
    id: EnemyId,
    position: Vec3,
    speed: f32,
    health: Health,
    path: Option<Arc<Path>>,
    waypoint_index: usize,
    destination: Vec3,
    phase: EnemyPhase,
}

impl Enemy {
    /// Creates an enemy at `position` that waits for a path.
    #[must_use]
    pub fn new(id: EnemyId, position: Vec3, config: EnemyConfig) -> Self {
        Self {
            id,
            position,
            speed: config.speed,
            health: Health::new(config.max_health),
            path: None,
            waypoint_index: 0,
            destination: position,
            phase: EnemyPhase::Uninitialized,
        }
    }

    /// Starts following `path`.
    ///
    /// An absent path is refused without touching the enemy. A path without
    /// waypoints is accepted but kills the enemy on the spot, so it never
    /// starts traveling.
    pub fn assign_path(
        &mut self,
        path: Option<Arc<Path>>,
        out: &mut Vec<Event>,
    ) -> Result<(), InvalidPathError> {
        let path = path.ok_or(InvalidPathError::Missing)?;
        if self.phase != EnemyPhase::Uninitialized {
            return Err(InvalidPathError::AlreadyAssigned);
        }

        let empty = path.is_empty();
        let lane = path.lane();
        self.path = Some(path);
        self.waypoint_index = 0;

        if empty {
            warn!(
                enemy = self.id.get(),
                lane = lane.get(),
                "assigned path has no waypoints"
            );
            self.die(DeathCause::EmptyPath, out);
            return Ok(());
        }

        self.phase = EnemyPhase::Traveling;
        self.advance(out);
        Ok(())
    }

    /// Advances the enemy along its path by `dt` of simulated time.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<Event>) {
        if self.phase != EnemyPhase::Traveling {
            return;
        }

        let Some(waypoint_count) = self.path.as_deref().map(Path::len) else {
            self.die(DeathCause::MissingWaypoint, out);
            return;
        };

        if self.position.distance(self.destination) < ARRIVAL_MARGIN {
            self.position = self.destination;

            if self.waypoint_index >= waypoint_count {
                self.phase = EnemyPhase::GoalReached;
                debug!(enemy = self.id.get(), "enemy reached the goal");
                out.push(Event::EnemyReachedGoal { enemy: self.id });
                return;
            }

            self.advance(out);
            if self.phase != EnemyPhase::Traveling {
                return;
            }

            trace!(
                enemy = self.id.get(),
                next_waypoint = self.waypoint_index - 1,
                "enemy reached a waypoint"
            );
            out.push(Event::WaypointReached {
                enemy: self.id,
                next_waypoint: self.waypoint_index - 1,
            });
        }

        let step = (self.speed * dt.as_secs_f32()).max(0.0);
        self.position = move_towards(self.position, self.destination, step);
    }

    /// Subtracts `amount` from the enemy's health, killing it once health drops below zero.
    ///
    /// Negative amounts are treated as zero. Enemies that already left the
    /// simulation ignore further damage.
    pub fn take_damage(&mut self, amount: f32, out: &mut Vec<Event>) {
        if self.phase.is_terminal() {
            return;
        }

        self.health = self.health.damaged(amount);
        if self.health.is_depleted() {
            self.die(DeathCause::Killed, out);
        }
    }

    /// Identifier assigned to the enemy.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Current position of the enemy.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    /// Lifecycle phase of the enemy.
    #[must_use]
    pub const fn phase(&self) -> EnemyPhase {
        self.phase
    }

    /// Reports whether the enemy is still part of the simulation.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        !self.phase.is_terminal()
    }

    /// Number of waypoints dispatched as destinations so far.
    #[must_use]
    pub const fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    /// Point the enemy is currently walking toward.
    #[must_use]
    pub const fn destination(&self) -> Vec3 {
        self.destination
    }

    /// Lane of the followed path, if any.
    #[must_use]
    pub fn lane(&self) -> Option<LaneId> {
        self.path.as_deref().map(Path::lane)
    }

    /// Captures an immutable snapshot of the enemy.
    #[must_use]
    pub fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: self.position,
            health: self.health,
            phase: self.phase,
            waypoint_index: self.waypoint_index,
            lane: self.lane(),
        }
    }

    fn advance(&mut self, out: &mut Vec<Event>) {
        let Some(waypoint) = self
            .path
            .as_deref()
            .and_then(|path| path.waypoint(self.waypoint_index))
        else {
            self.die(DeathCause::MissingWaypoint, out);
            return;
        };

        self.destination = Vec3::new(waypoint.x, self.position.y, waypoint.z);
        self.waypoint_index += 1;
    }

    fn die(&mut self, cause: DeathCause, out: &mut Vec<Event>) {
        self.phase = EnemyPhase::Dead;
        debug!(enemy = self.id.get(), ?cause, "enemy died");
        out.push(Event::EnemyDied {
            enemy: self.id,
            cause,
        });
    }
}

/// Moves `current` toward `target` by at most `max_distance`, landing exactly on
/// `target` when it is within reach.
pub(crate) fn move_towards(current: Vec3, target: Vec3, max_distance: f32) -> Vec3 {
    let offset = target - current;
    let distance = offset.length();
    if distance <= max_distance || distance == 0.0 {
        return target;
    }
    current + offset / distance * max_distance
}

/// Ordered set of live enemies that also allocates enemy identifiers.
#[derive(Debug)]
pub(crate) struct EnemyRegistry {
    entries: Vec<Enemy>,
    next_enemy_id: EnemyId,
}

impl EnemyRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_enemy_id: EnemyId::new(0),
        }
    }

    /// Creates and registers an enemy, returning its identifier.
    pub(crate) fn spawn(&mut self, origin: Vec3, config: EnemyConfig) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().wrapping_add(1));
        self.entries.push(Enemy::new(id, origin, config));
        id
    }

    pub(crate) fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.entries.iter().find(|enemy| enemy.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.entries.iter_mut().find(|enemy| enemy.id == id)
    }

    pub(crate) fn as_slice(&self) -> &[Enemy] {
        &self.entries
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Enemy] {
        &mut self.entries
    }

    /// Drops every enemy in a terminal phase, announcing each removal.
    pub(crate) fn sweep(&mut self, out: &mut Vec<Event>) {
        self.entries.retain(|enemy| {
            if enemy.phase.is_terminal() {
                out.push(Event::EnemyRemoved { enemy: enemy.id });
                false
            } else {
                true
            }
        });
    }
}
