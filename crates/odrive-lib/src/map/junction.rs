use indexmap::{IndexMap, IndexSet};
use odrive_core::BoundingBox;
use serde::Serialize;

use super::road::ContactPoint;
use crate::ids::{ConId, ContId, JuncId, LaneId, RoadId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaneLink {
    pub from: LaneId,
    pub to: LaneId,
}

/// Traffic flowing from `incoming_road` into `connecting_road`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub id: ConId,
    pub incoming_road: RoadId,
    pub connecting_road: RoadId,
    pub contact_point: Option<ContactPoint>,
    pub lane_links: Vec<LaneLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Junction {
    pub(crate) id: JuncId,
    pub(crate) name: String,
    pub(crate) connections: IndexMap<ConId, Connection>,
    pub(crate) controllers: IndexSet<ContId>,
    pub(crate) bounding_box: BoundingBox,
    pub(crate) conflicts: IndexMap<RoadId, IndexSet<RoadId>>,
}

impl Junction {
    pub(crate) fn new(id: JuncId, name: String) -> Self {
        Self {
            id,
            name,
            connections: IndexMap::new(),
            controllers: IndexSet::new(),
            bounding_box: BoundingBox::default(),
            conflicts: IndexMap::new(),
        }
    }

    pub fn id(&self) -> JuncId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn connection(&self, id: ConId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn controllers(&self) -> &IndexSet<ContId> {
        &self.controllers
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Conflicting road pairs, stored from both sides.
    pub fn conflicts(&self) -> &IndexMap<RoadId, IndexSet<RoadId>> {
        &self.conflicts
    }

    /// Roads whose drivable area overlaps `road` inside this junction.
    pub fn conflicts_of(&self, road: RoadId) -> impl Iterator<Item = RoadId> {
        self.conflicts.get(&road).into_iter().flatten().copied()
    }

    pub(crate) fn add_conflict(&mut self, a: RoadId, b: RoadId) {
        self.conflicts.entry(a).or_default().insert(b);
        self.conflicts.entry(b).or_default().insert(a);
    }
}
