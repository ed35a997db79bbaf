//! Scenario files describing lanes, towers, and the spawner for a headless run.

use std::{fs, path::Path, time::Duration};

use glam::Vec3;
use lane_defence_core::{Command, EnemyConfig, LaneId, TowerConfig};
use lane_defence_system_spawning::{Config, Spawning};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_TICKS: u32 = 600;
const DEFAULT_DT_MS: u64 = 50;

/// Complete description of a headless run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    /// Lanes published before the first tick.
    #[serde(default)]
    pub(crate) lanes: Vec<LaneSpec>,
    /// Towers placed before the first tick.
    #[serde(default)]
    pub(crate) towers: Vec<TowerSpec>,
    /// Spawner feeding enemies into a lane, if any.
    #[serde(default)]
    pub(crate) spawner: Option<SpawnerSpec>,
    /// Number of ticks to simulate.
    #[serde(default = "default_ticks")]
    pub(crate) ticks: u32,
    /// Length of a single tick in milliseconds.
    #[serde(default = "default_dt_ms")]
    pub(crate) dt_ms: u64,
}

/// Lane entry of a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LaneSpec {
    /// Identifier of the lane.
    pub(crate) id: LaneId,
    /// Waypoints in visiting order.
    pub(crate) waypoints: Vec<Vec3>,
}

/// Tower entry of a scenario; omitted parameters fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TowerSpec {
    /// Fixed location of the tower.
    pub(crate) position: Vec3,
    /// Detection radius override.
    #[serde(default)]
    pub(crate) range: Option<f32>,
    /// Damage per shot override.
    #[serde(default)]
    pub(crate) damage: Option<f32>,
    /// Cooldown override in milliseconds.
    #[serde(default)]
    pub(crate) cooldown_ms: Option<u64>,
}

impl TowerSpec {
    fn config(&self) -> TowerConfig {
        let defaults = TowerConfig::default();
        TowerConfig {
            range: self.range.unwrap_or(defaults.range),
            damage: self.damage.unwrap_or(defaults.damage),
            cooldown: self
                .cooldown_ms
                .map_or(defaults.cooldown, Duration::from_millis),
        }
    }
}

/// Spawner entry of a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SpawnerSpec {
    /// Time between spawns in milliseconds.
    pub(crate) interval_ms: u64,
    /// Position new enemies appear at.
    pub(crate) origin: Vec3,
    /// Lane assigned to new enemies.
    pub(crate) lane: LaneId,
    /// Parameters of spawned enemies.
    #[serde(default)]
    pub(crate) enemy: EnemyConfig,
}

/// Errors that can occur while loading a scenario.
#[derive(Debug, Error)]
pub(crate) enum ScenarioError {
    /// The scenario file could not be read.
    #[error("could not read scenario file '{path}'")]
    Read {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The scenario document is not valid.
    #[error("could not parse scenario")]
    Parse(#[from] serde_json::Error),
    /// The tick length is zero, so simulated time would never advance.
    #[error("tick length must be greater than zero")]
    ZeroTick,
    /// The spawner feeds a lane that the scenario never configures.
    #[error("spawner lane {} is not configured", .0.get())]
    UnknownLane(LaneId),
}

impl Scenario {
    /// Reads and validates the scenario stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses and validates a scenario document.
    pub(crate) fn parse(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Single-lane scenario with two towers guarding a bend.
    pub(crate) fn builtin() -> Self {
        let lane = LaneId::new(1);
        Self {
            lanes: vec![LaneSpec {
                id: lane,
                waypoints: vec![
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(20.0, 0.0, 0.0),
                    Vec3::new(20.0, 0.0, 20.0),
                    Vec3::new(40.0, 0.0, 20.0),
                ],
            }],
            towers: vec![
                TowerSpec {
                    position: Vec3::new(15.0, 0.0, 4.0),
                    range: None,
                    damage: None,
                    cooldown_ms: None,
                },
                TowerSpec {
                    position: Vec3::new(24.0, 0.0, 12.0),
                    range: Some(8.0),
                    damage: Some(12.0),
                    cooldown_ms: Some(1_500),
                },
            ],
            spawner: Some(SpawnerSpec {
                interval_ms: 1_000,
                origin: Vec3::ZERO,
                lane,
                enemy: EnemyConfig::default(),
            }),
            ticks: DEFAULT_TICKS,
            dt_ms: DEFAULT_DT_MS,
        }
    }

    /// Length of a single tick.
    pub(crate) fn dt(&self) -> Duration {
        Duration::from_millis(self.dt_ms)
    }

    /// Commands that publish the lanes and place the towers.
    pub(crate) fn setup_commands(&self) -> Vec<Command> {
        let lanes = self.lanes.iter().map(|lane| Command::ConfigureLane {
            lane: lane.id,
            waypoints: lane.waypoints.clone(),
        });
        let towers = self.towers.iter().map(|tower| Command::PlaceTower {
            position: tower.position,
            config: tower.config(),
        });
        lanes.chain(towers).collect()
    }

    /// Spawning system described by the scenario, if it has a spawner.
    pub(crate) fn spawning(&self) -> Option<Spawning> {
        self.spawner.as_ref().map(|spawner| {
            Spawning::new(Config::new(
                Duration::from_millis(spawner.interval_ms),
                spawner.origin,
                spawner.lane,
                spawner.enemy,
            ))
        })
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if self.dt_ms == 0 {
            return Err(ScenarioError::ZeroTick);
        }
        if let Some(spawner) = &self.spawner {
            if !self.lanes.iter().any(|lane| lane.id == spawner.lane) {
                return Err(ScenarioError::UnknownLane(spawner.lane));
            }
        }
        Ok(())
    }
}

fn default_ticks() -> u32 {
    DEFAULT_TICKS
}

fn default_dt_ms() -> u64 {
    DEFAULT_DT_MS
}
