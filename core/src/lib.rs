#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Distance below which an enemy counts as standing on its destination.
pub const ARRIVAL_MARGIN: f32 = 0.1;

/// Travel speed assigned to enemies when no override is configured.
pub const DEFAULT_ENEMY_SPEED: f32 = 4.0;

/// Health assigned to freshly spawned enemies when no override is configured.
pub const DEFAULT_ENEMY_HEALTH: f32 = 100.0;

/// Detection radius of a tower when no override is configured.
pub const DEFAULT_TOWER_RANGE: f32 = 6.0;

/// Damage applied by a single tower shot when no override is configured.
pub const DEFAULT_TOWER_DAMAGE: f32 = 5.0;

/// Time a tower waits between shots when no override is configured.
pub const DEFAULT_TOWER_COOLDOWN: Duration = Duration::from_secs(2);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Publishes the waypoints that make up a lane, replacing any previous path.
    ConfigureLane {
        /// Lane being configured.
        lane: LaneId,
        /// Ordered waypoint positions enemies on the lane visit.
        waypoints: Vec<Vec3>,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a new enemy enter the world.
    SpawnEnemy {
        /// Position the enemy occupies when created.
        origin: Vec3,
        /// Lane whose path is assigned right after spawning, if any.
        lane: Option<LaneId>,
        /// Movement and health parameters for the enemy.
        config: EnemyConfig,
    },
    /// Requests that an existing enemy start following a lane's path.
    AssignPath {
        /// Enemy receiving the path.
        enemy: EnemyId,
        /// Lane providing the path.
        lane: LaneId,
    },
    /// Requests placement of a tower at the provided position.
    PlaceTower {
        /// Fixed location of the tower.
        position: Vec3,
        /// Combat parameters of the tower.
        config: TowerConfig,
    },
    /// Applies damage originating outside the tower loop.
    DamageEnemy {
        /// Enemy receiving the damage.
        enemy: EnemyId,
        /// Damage amount; negative values are treated as zero.
        amount: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a lane path was published.
    LaneConfigured {
        /// Lane that was configured.
        lane: LaneId,
        /// Number of waypoints in the published path.
        waypoints: usize,
    },
    /// Confirms that an enemy entered the world.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        enemy: EnemyId,
        /// Position the enemy occupies after spawning.
        position: Vec3,
    },
    /// Confirms that an enemy accepted a lane path.
    PathAssigned {
        /// Enemy that received the path.
        enemy: EnemyId,
        /// Lane the path belongs to.
        lane: LaneId,
    },
    /// Reports that a path assignment was refused.
    PathRejected {
        /// Enemy the assignment targeted.
        enemy: EnemyId,
        /// Lane named by the assignment.
        lane: LaneId,
        /// Specific reason the assignment failed.
        reason: InvalidPathError,
    },
    /// Reports that an enemy arrived at a waypoint and turned toward the next one.
    WaypointReached {
        /// Enemy that arrived.
        enemy: EnemyId,
        /// Index of the waypoint the enemy now heads for.
        next_waypoint: usize,
    },
    /// Reports that an enemy visited every waypoint of its path.
    EnemyReachedGoal {
        /// Enemy that reached the goal.
        enemy: EnemyId,
    },
    /// Reports that an enemy died.
    EnemyDied {
        /// Enemy that died.
        enemy: EnemyId,
        /// Why the enemy died.
        cause: DeathCause,
    },
    /// Signals that a terminal enemy left the live registry.
    EnemyRemoved {
        /// Enemy that was removed.
        enemy: EnemyId,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Fixed location of the tower.
        position: Vec3,
    },
    /// Reports that a tower locked onto an enemy.
    TargetAcquired {
        /// Tower that acquired the target.
        tower: TowerId,
        /// Enemy that became the target.
        enemy: EnemyId,
    },
    /// Reports that a tower dropped a target that died, left or moved out of range.
    TargetLost {
        /// Tower that dropped the target.
        tower: TowerId,
        /// Enemy that was dropped.
        enemy: EnemyId,
    },
    /// Reports that a tower shot its target.
    TowerFired {
        /// Tower that fired.
        tower: TowerId,
        /// Enemy that was hit.
        enemy: EnemyId,
        /// Damage applied by the shot.
        damage: f32,
    },
}

/// Reasons a path assignment may be refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidPathError {
    /// No path exists for the requested lane.
    #[error("no path is available for the requested lane")]
    Missing,
    /// The enemy already follows a path; reassignment is unsupported.
    #[error("enemy already follows a path")]
    AlreadyAssigned,
}

/// Reasons an enemy may die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Health dropped below zero.
    Killed,
    /// The assigned path contained no waypoints.
    EmptyPath,
    /// The next waypoint could not be resolved from the path.
    MissingWaypoint,
}

/// Lifecycle phases of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyPhase {
    /// Spawned but not yet following a path.
    Uninitialized,
    /// Following its path toward the goal.
    Traveling,
    /// Visited every waypoint; awaiting removal.
    GoalReached,
    /// Destroyed; awaiting removal.
    Dead,
}

impl EnemyPhase {
    /// Reports whether the phase ends the enemy's life.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GoalReached | Self::Dead)
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a lane, the named route enemies follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneId(u32);

impl LaneId {
    /// Creates a new lane identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the lane identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Remaining hit points of an enemy.
///
/// An enemy is only destroyed once its health drops strictly below zero, so a
/// value of exactly zero still counts as alive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Health(f32);

impl Health {
    /// Wraps the provided hit point value.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Retrieves the hit point value.
    #[must_use]
    pub const fn get(&self) -> f32 {
        self.0
    }

    /// Reports whether the health fell below zero.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.0 < 0.0
    }

    /// Returns the health left after absorbing `amount`; negative amounts never heal.
    #[must_use]
    pub fn damaged(self, amount: f32) -> Self {
        Self(self.0 - amount.max(0.0))
    }
}

/// Ordered, immutable sequence of waypoints belonging to a lane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    lane: LaneId,
    waypoints: Vec<Vec3>,
}

impl Path {
    /// Creates a path for `lane` from the provided waypoints.
    #[must_use]
    pub fn new(lane: LaneId, waypoints: Vec<Vec3>) -> Self {
        Self { lane, waypoints }
    }

    /// Lane the path belongs to.
    #[must_use]
    pub const fn lane(&self) -> LaneId {
        self.lane
    }

    /// Waypoints in visiting order.
    #[must_use]
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Waypoint stored at `index`, if any.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<Vec3> {
        self.waypoints.get(index).copied()
    }

    /// Number of waypoints in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Reports whether the path has no waypoints and is therefore unusable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Movement and durability parameters of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Distance travelled per second of simulated time.
    pub speed: f32,
    /// Health the enemy starts with.
    pub max_health: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_ENEMY_SPEED,
            max_health: DEFAULT_ENEMY_HEALTH,
        }
    }
}

/// Combat parameters of a tower.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    /// Detection radius in world units.
    pub range: f32,
    /// Damage applied per shot.
    pub damage: f32,
    /// Time the tower waits after firing before it may fire again.
    pub cooldown: Duration,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            range: DEFAULT_TOWER_RANGE,
            damage: DEFAULT_TOWER_DAMAGE,
            cooldown: DEFAULT_TOWER_COOLDOWN,
        }
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current position of the enemy.
    pub position: Vec3,
    /// Remaining health.
    pub health: Health,
    /// Lifecycle phase.
    pub phase: EnemyPhase,
    /// Number of waypoints dispatched as destinations so far.
    pub waypoint_index: usize,
    /// Lane of the followed path, if a path was assigned.
    pub lane: Option<LaneId>,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Fixed location of the tower.
    pub position: Vec3,
    /// Combat parameters of the tower.
    pub config: TowerConfig,
    /// Time left before the tower may fire again.
    pub cooldown_remaining: Duration,
    /// Enemy currently tracked by the tower.
    pub target: Option<EnemyId>,
}

/// Read-only snapshot describing all towers placed in the world.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Aggregated counters describing how a run went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Enemies that entered the world.
    pub enemies_spawned: u32,
    /// Enemies destroyed by damage.
    pub enemies_killed: u32,
    /// Enemies that reached the end of their lane.
    pub enemies_leaked: u32,
    /// Enemies discarded because their path was unusable.
    pub enemies_discarded: u32,
    /// Shots fired by all towers.
    pub shots_fired: u32,
    /// Total damage applied by tower shots.
    pub damage_dealt: f32,
}
