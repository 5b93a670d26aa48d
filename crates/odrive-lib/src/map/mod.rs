//! The sealed road network.
//!
//! A [`Map`] is produced once by the builder and never mutated afterwards.
//! All lookups go through ids assigned by the source document; cross links
//! between entities are ids or [`LaneKey`]s, never references.

mod geo;
mod info;
mod junction;
mod lane;
mod road;
mod signal;

#[cfg(test)]
mod info_tests;

use std::f64::consts::PI;

use indexmap::{IndexMap, IndexSet};
use odrive_core::{Rotation, Transform};
use serde::Serialize;

pub use geo::{GeoLocation, GeoReference};
pub use info::{
    Access, CrossfallSide, Elevation, Height, InfoKind, InfoSet, LaneBorder, LaneChange, LaneInfo,
    LaneOffset, LaneWidth, Lateral, LateralKind, Material, Record, RoadInfo, RoadMark,
    RoadMarkLine, RoadSpeed, Rule, SpeedLimit, Visibility,
};
pub use junction::{Connection, Junction, LaneLink};
pub use lane::{Lane, LaneType};
pub use road::{ContactPoint, LaneSection, LinkElement, Road, RoadLink};
pub use signal::{
    Controller, Dependency, LaneValidity, Orientation, Signal, SignalReference, TrafficGroup,
};

use crate::ids::{ContId, JuncId, LaneId, LaneKey, RoadId, SignId};

/// Failed map lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("road {0} does not exist")]
    RoadNotFound(RoadId),

    #[error("road {road} has no lane {lane} at s={s}")]
    LaneNotFound { road: RoadId, lane: LaneId, s: f64 },

    #[error("s={s} is outside road {road} (length {length})")]
    OutOfRange { road: RoadId, s: f64, length: f64 },

    #[error("road {0} has no plan view geometry")]
    NoGeometry(RoadId),

    #[error("junction {0} does not exist")]
    JunctionNotFound(JuncId),

    #[error("signal `{0}` does not exist")]
    SignalNotFound(SignId),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Map {
    pub(crate) geo_reference: GeoReference,
    pub(crate) roads: IndexMap<RoadId, Road>,
    pub(crate) junctions: IndexMap<JuncId, Junction>,
    pub(crate) signals: IndexMap<SignId, Signal>,
    pub(crate) signal_references: Vec<SignalReference>,
    pub(crate) controllers: IndexMap<ContId, Controller>,
    pub(crate) traffic_groups: Vec<TrafficGroup>,
}

impl Map {
    pub fn geo_reference(&self) -> GeoReference {
        self.geo_reference
    }

    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    pub fn junctions(&self) -> impl Iterator<Item = &Junction> {
        self.junctions.values()
    }

    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.signals.values()
    }

    pub fn signal_references(&self) -> &[SignalReference] {
        &self.signal_references
    }

    pub fn controllers(&self) -> impl Iterator<Item = &Controller> {
        self.controllers.values()
    }

    pub fn traffic_groups(&self) -> &[TrafficGroup] {
        &self.traffic_groups
    }

    pub fn road(&self, id: RoadId) -> Result<&Road, QueryError> {
        self.roads.get(&id).ok_or(QueryError::RoadNotFound(id))
    }

    /// Lane `lane` of the section of `road` containing `s`.
    ///
    /// `s` must lie in `[0, length)`.
    pub fn lane(&self, road: RoadId, lane: LaneId, s: f64) -> Result<&Lane, QueryError> {
        let r = self.road(road)?;
        if !(0.0..r.length).contains(&s) {
            return Err(QueryError::OutOfRange {
                road,
                s,
                length: r.length,
            });
        }
        r.section_at(s)
            .and_then(|section| section.lane(lane))
            .ok_or(QueryError::LaneNotFound { road, lane, s })
    }

    pub fn lane_by_key(&self, key: LaneKey) -> Option<&Lane> {
        self.roads
            .get(&key.road)?
            .section(key.section)?
            .lane(key.lane)
    }

    pub(crate) fn lane_by_key_mut(&mut self, key: LaneKey) -> Option<&mut Lane> {
        self.roads
            .get_mut(&key.road)?
            .sections
            .get_mut(key.section as usize)?
            .lanes
            .get_mut(&key.lane)
    }

    pub fn lane_width(&self, road: RoadId, lane: LaneId, s: f64) -> Result<f64, QueryError> {
        Ok(self.lane(road, lane, s)?.width(s))
    }

    /// World pose of the middle of a lane at `s`.
    ///
    /// Left lanes (positive ids) face against the road's `s` direction.
    pub fn lane_transform(
        &self,
        road: RoadId,
        lane: LaneId,
        s: f64,
    ) -> Result<Transform, QueryError> {
        let l = self.lane(road, lane, s)?;
        let point = self
            .road(road)?
            .lane_point(l, s)
            .ok_or(QueryError::NoGeometry(road))?;

        let mut rotation = Rotation::new(point.pitch, point.tangent, 0.0);
        if lane > 0 {
            rotation.yaw += PI;
            rotation.pitch = -rotation.pitch;
        }
        Ok(Transform::new(point.location, rotation))
    }

    pub fn junction(&self, id: JuncId) -> Result<&Junction, QueryError> {
        self.junctions
            .get(&id)
            .ok_or(QueryError::JunctionNotFound(id))
    }

    pub fn signal(&self, id: &str) -> Result<&Signal, QueryError> {
        self.signals
            .get(id)
            .ok_or_else(|| QueryError::SignalNotFound(id.to_string()))
    }

    pub fn controller(&self, id: &str) -> Option<&Controller> {
        self.controllers.get(id)
    }

    /// The signal a reference points to, if it resolved.
    pub fn referenced_signal(&self, reference: &SignalReference) -> Option<&Signal> {
        reference
            .signal
            .and_then(|index| self.signals.get_index(index))
            .map(|(_, signal)| signal)
    }

    pub fn signal_references_on(&self, road: RoadId) -> impl Iterator<Item = &SignalReference> {
        self.signal_references
            .iter()
            .filter(move |reference| reference.road == road)
    }

    pub fn junction_conflicts(
        &self,
        junction: JuncId,
    ) -> Result<&IndexMap<RoadId, IndexSet<RoadId>>, QueryError> {
        Ok(self.junction(junction)?.conflicts())
    }

    /// Roads in `junction` conflicting with `road`.
    pub fn conflicts_of(
        &self,
        junction: JuncId,
        road: RoadId,
    ) -> Result<impl Iterator<Item = RoadId>, QueryError> {
        Ok(self.junction(junction)?.conflicts_of(road))
    }

    /// Lanes of `junction`'s roads with a type in `mask`.
    pub fn junction_lanes(&self, junction: JuncId, mask: LaneType) -> Vec<&Lane> {
        self.roads
            .values()
            .filter(|road| road.junction_id == junction)
            .flat_map(|road| road.sections.iter())
            .flat_map(|section| section.lanes())
            .filter(|lane| lane.id != 0 && mask.contains(lane.lane_type))
            .collect()
    }
}
