use std::time::Duration;

use glam::Vec3;
use lane_defence_core::{
    Command, DeathCause, EnemyConfig, EnemyId, EnemyPhase, Event, Health, InvalidPathError, LaneId,
    TowerConfig, TowerId,
};
use lane_defence_world::{self as world, query, World};

fn configure_lane(world: &mut World, lane: u32, waypoints: Vec<Vec3>) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::ConfigureLane {
            lane: LaneId::new(lane),
            waypoints,
        },
        &mut events,
    );
}

fn spawn(world: &mut World, origin: Vec3, lane: Option<u32>, config: EnemyConfig) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SpawnEnemy {
            origin,
            lane: lane.map(LaneId::new),
            config,
        },
        &mut events,
    );
    events
}

fn place_tower(world: &mut World, position: Vec3, config: TowerConfig) {
    let mut events = Vec::new();
    world::apply(world, Command::PlaceTower { position, config }, &mut events);
}

fn tick(world: &mut World, dt: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt }, &mut events);
    events
}

fn shots(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::TowerFired { .. }))
        .count()
}

fn removed(events: &[Event]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, Event::EnemyRemoved { .. }))
}

#[test]
fn enemy_walks_its_lane_and_leaves_at_the_goal() {
    let mut world = World::new();
    configure_lane(
        &mut world,
        1,
        vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)],
    );
    let spawned = spawn(&mut world, Vec3::ZERO, Some(1), EnemyConfig::default());
    assert!(spawned.contains(&Event::PathAssigned {
        enemy: EnemyId::new(0),
        lane: LaneId::new(1),
    }));

    let dt = Duration::from_millis(500);
    for step in 1..=5 {
        let events = tick(&mut world, dt);
        assert!(!removed(&events), "enemy removed early on tick {step}");
        assert_eq!(query::enemies(&world).len(), 1);
    }

    let enemy = query::enemy(&world, EnemyId::new(0)).expect("enemy still walking");
    assert_eq!(enemy.position(), Vec3::new(10.0, 0.0, 0.0));

    let events = tick(&mut world, dt);
    assert_eq!(
        events,
        vec![
            Event::TimeAdvanced { dt },
            Event::EnemyReachedGoal {
                enemy: EnemyId::new(0)
            },
            Event::EnemyRemoved {
                enemy: EnemyId::new(0)
            },
        ]
    );
    assert!(query::enemies(&world).is_empty());
}

#[test]
fn enemy_keeps_spawn_height_along_the_lane() {
    let mut world = World::new();
    configure_lane(
        &mut world,
        1,
        vec![Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -3.0, 8.0)],
    );
    let _ = spawn(
        &mut world,
        Vec3::new(0.0, 1.0, 0.0),
        Some(1),
        EnemyConfig::default(),
    );

    for _ in 0..3 {
        let _ = tick(&mut world, Duration::from_millis(500));
        let enemy = query::enemy(&world, EnemyId::new(0)).expect("enemy");
        assert!((enemy.position().y - 1.0).abs() < f32::EPSILON);
    }
}

#[test]
fn empty_lane_discards_enemy_during_spawn() {
    let mut world = World::new();
    configure_lane(&mut world, 2, Vec::new());

    let events = spawn(&mut world, Vec3::ZERO, Some(2), EnemyConfig::default());

    assert_eq!(
        events,
        vec![
            Event::EnemySpawned {
                enemy: EnemyId::new(0),
                position: Vec3::ZERO,
            },
            Event::EnemyDied {
                enemy: EnemyId::new(0),
                cause: DeathCause::EmptyPath,
            },
            Event::EnemyRemoved {
                enemy: EnemyId::new(0)
            },
        ]
    );
    assert!(query::enemies(&world).is_empty());
}

#[test]
fn unknown_lane_is_rejected_and_enemy_waits() {
    let mut world = World::new();
    let _ = spawn(&mut world, Vec3::new(1.0, 0.0, 1.0), None, EnemyConfig::default());

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::AssignPath {
            enemy: EnemyId::new(0),
            lane: LaneId::new(99),
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::PathRejected {
            enemy: EnemyId::new(0),
            lane: LaneId::new(99),
            reason: InvalidPathError::Missing,
        }]
    );

    let events = tick(&mut world, Duration::from_secs(1));
    assert_eq!(
        events,
        vec![Event::TimeAdvanced {
            dt: Duration::from_secs(1)
        }]
    );
    let enemy = query::enemy(&world, EnemyId::new(0)).expect("enemy remains registered");
    assert_eq!(enemy.phase(), EnemyPhase::Uninitialized);
    assert_eq!(enemy.position(), Vec3::new(1.0, 0.0, 1.0));
}

#[test]
fn second_path_assignment_is_rejected() {
    let mut world = World::new();
    configure_lane(&mut world, 1, vec![Vec3::X, Vec3::Z]);
    configure_lane(&mut world, 2, vec![Vec3::NEG_X]);
    let _ = spawn(&mut world, Vec3::ZERO, Some(1), EnemyConfig::default());

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::AssignPath {
            enemy: EnemyId::new(0),
            lane: LaneId::new(2),
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![Event::PathRejected {
            enemy: EnemyId::new(0),
            lane: LaneId::new(2),
            reason: InvalidPathError::AlreadyAssigned,
        }]
    );
    let enemy = query::enemy(&world, EnemyId::new(0)).expect("enemy");
    assert_eq!(enemy.lane(), Some(LaneId::new(1)));
}

#[test]
fn tower_kills_enemy_over_three_fire_cycles() {
    let mut world = World::new();
    place_tower(&mut world, Vec3::ZERO, TowerConfig::default());
    let _ = spawn(
        &mut world,
        Vec3::new(3.0, 0.0, 0.0),
        None,
        EnemyConfig {
            max_health: 12.0,
            ..EnemyConfig::default()
        },
    );

    let dt = Duration::from_secs(2);
    let mut total_shots = 0;
    for step in 1..=5 {
        let events = tick(&mut world, dt);
        total_shots += shots(&events);
        assert!(!removed(&events), "enemy removed early on tick {step}");
    }
    let enemy = query::enemy(&world, EnemyId::new(0)).expect("enemy survives five ticks");
    assert_eq!(enemy.health(), Health::new(2.0));
    assert_eq!(total_shots, 2);

    let events = tick(&mut world, dt);
    assert_eq!(shots(&events), 1);
    assert!(events.contains(&Event::EnemyDied {
        enemy: EnemyId::new(0),
        cause: DeathCause::Killed,
    }));
    assert!(removed(&events));
    assert!(query::enemies(&world).is_empty());
}

#[test]
fn enemy_killed_mid_tick_is_not_targeted_by_later_towers() {
    let mut world = World::new();
    place_tower(&mut world, Vec3::ZERO, TowerConfig::default());
    place_tower(&mut world, Vec3::new(0.0, 0.0, 1.0), TowerConfig::default());
    let _ = spawn(
        &mut world,
        Vec3::new(1.0, 0.0, 0.0),
        None,
        EnemyConfig {
            max_health: 3.0,
            ..EnemyConfig::default()
        },
    );

    let dt = Duration::from_millis(100);
    let acquired = tick(&mut world, dt);
    assert_eq!(
        acquired
            .iter()
            .filter(|event| matches!(event, Event::TargetAcquired { .. }))
            .count(),
        2
    );

    let events = tick(&mut world, dt);
    assert_eq!(
        events,
        vec![
            Event::TimeAdvanced { dt },
            Event::TowerFired {
                tower: TowerId::new(0),
                enemy: EnemyId::new(0),
                damage: 5.0,
            },
            Event::EnemyDied {
                enemy: EnemyId::new(0),
                cause: DeathCause::Killed,
            },
            Event::TargetLost {
                tower: TowerId::new(1),
                enemy: EnemyId::new(0),
            },
            Event::EnemyRemoved {
                enemy: EnemyId::new(0)
            },
        ]
    );

    let events = tick(&mut world, dt);
    assert_eq!(
        events,
        vec![
            Event::TimeAdvanced { dt },
            Event::TargetLost {
                tower: TowerId::new(0),
                enemy: EnemyId::new(0),
            },
        ]
    );
    assert!(query::towers(&world).iter().all(|tower| tower.target().is_none()));
}

#[test]
fn enemy_leaving_at_the_goal_is_never_scanned() {
    let mut world = World::new();
    configure_lane(&mut world, 1, vec![Vec3::new(2.0, 0.0, 0.0)]);
    place_tower(&mut world, Vec3::ZERO, TowerConfig::default());
    let _ = spawn(
        &mut world,
        Vec3::new(2.0, 0.0, 0.0),
        Some(1),
        EnemyConfig::default(),
    );

    let events = tick(&mut world, Duration::from_millis(100));

    assert!(events.contains(&Event::EnemyReachedGoal {
        enemy: EnemyId::new(0)
    }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::TargetAcquired { .. })));
}

#[test]
fn external_damage_is_clamped_and_unknown_targets_are_ignored() {
    let mut world = World::new();
    let _ = spawn(&mut world, Vec3::ZERO, None, EnemyConfig::default());

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::DamageEnemy {
            enemy: EnemyId::new(0),
            amount: -5.0,
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::DamageEnemy {
            enemy: EnemyId::new(42),
            amount: 500.0,
        },
        &mut events,
    );

    assert!(events.is_empty());
    let enemy = query::enemy(&world, EnemyId::new(0)).expect("enemy");
    assert_eq!(enemy.health(), Health::new(100.0));
}

#[test]
fn views_reflect_registry_state() {
    let mut world = World::new();
    configure_lane(&mut world, 3, vec![Vec3::new(4.0, 0.0, 0.0)]);
    place_tower(&mut world, Vec3::new(0.0, 0.0, 2.0), TowerConfig::default());
    let _ = spawn(&mut world, Vec3::ZERO, Some(3), EnemyConfig::default());
    let _ = spawn(&mut world, Vec3::Z, None, EnemyConfig::default());

    let enemies = query::enemy_view(&world).into_vec();
    assert_eq!(enemies.len(), 2);
    assert_eq!(enemies[0].phase, EnemyPhase::Traveling);
    assert_eq!(enemies[0].lane, Some(LaneId::new(3)));
    assert_eq!(enemies[0].waypoint_index, 1);
    assert_eq!(enemies[1].phase, EnemyPhase::Uninitialized);

    let towers = query::tower_view(&world).into_vec();
    assert_eq!(towers.len(), 1);
    assert_eq!(towers[0].id, TowerId::new(0));
    assert_eq!(towers[0].target, None);
    assert!(query::lane(&world, LaneId::new(3)).is_some());
}
