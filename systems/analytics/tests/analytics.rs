use std::time::Duration;

use glam::Vec3;
use lane_defence_core::{Command, EnemyConfig, LaneId, StatsReport, TowerConfig};
use lane_defence_system_analytics::Analytics;
use lane_defence_world::{self as world, World};

#[test]
fn report_tracks_leaks_kills_and_discards() {
    let mut world = World::new();
    let mut analytics = Analytics::new();
    let setup = vec![
        Command::ConfigureLane {
            lane: LaneId::new(1),
            waypoints: vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)],
        },
        Command::ConfigureLane {
            lane: LaneId::new(2),
            waypoints: Vec::new(),
        },
        Command::PlaceTower {
            position: Vec3::new(50.0, 0.0, 0.0),
            config: TowerConfig::default(),
        },
        Command::SpawnEnemy {
            origin: Vec3::ZERO,
            lane: Some(LaneId::new(1)),
            config: EnemyConfig::default(),
        },
        Command::SpawnEnemy {
            origin: Vec3::new(50.0, 0.0, 3.0),
            lane: None,
            config: EnemyConfig {
                max_health: 4.0,
                ..EnemyConfig::default()
            },
        },
        Command::SpawnEnemy {
            origin: Vec3::ZERO,
            lane: Some(LaneId::new(2)),
            config: EnemyConfig::default(),
        },
    ];

    for command in setup {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        analytics.handle(&events);
    }

    for _ in 0..2 {
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(500),
            },
            &mut events,
        );
        analytics.handle(&events);
    }

    assert_eq!(analytics.ticks_observed(), 2);
    assert_eq!(
        *analytics.report(),
        StatsReport {
            enemies_spawned: 3,
            enemies_killed: 1,
            enemies_leaked: 1,
            enemies_discarded: 1,
            shots_fired: 1,
            damage_dealt: 5.0,
        }
    );
}
