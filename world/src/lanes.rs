//! Lane paths published to the world.

use std::{collections::BTreeMap, sync::Arc};

use glam::Vec3;
use lane_defence_core::{LaneId, Path};

/// Lane table owned by the world.
///
/// Reconfiguring a lane publishes a fresh path; enemies already walking the
/// previous one keep their shared copy.
#[derive(Debug, Default)]
pub struct LaneTable {
    lanes: BTreeMap<LaneId, Arc<Path>>,
}

impl LaneTable {
    /// Creates an empty lane table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `waypoints` as the path of `lane`, returning the waypoint count.
    pub fn configure(&mut self, lane: LaneId, waypoints: Vec<Vec3>) -> usize {
        let path = Arc::new(Path::new(lane, waypoints));
        let count = path.len();
        let _ = self.lanes.insert(lane, path);
        count
    }

    /// Path currently published for `lane`, if any.
    #[must_use]
    pub fn path(&self, lane: LaneId) -> Option<Arc<Path>> {
        self.lanes.get(&lane).cloned()
    }

    /// Number of configured lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Reports whether no lane has been configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}
