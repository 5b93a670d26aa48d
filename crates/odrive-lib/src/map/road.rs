use std::collections::BTreeMap;

use odrive_core::math::clamp;
use odrive_core::{DirectedPoint, Geometry};
use serde::Serialize;

use super::info::{Elevation, InfoKind, InfoSet, LaneOffset, RoadInfo, RoadSpeed};
use super::lane::Lane;
use crate::ids::{JuncId, LaneId, RoadId, SectionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactPoint {
    Start,
    End,
}

impl ContactPoint {
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkElement {
    Road,
    Junction,
}

/// A road's `<predecessor>` or `<successor>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoadLink {
    pub element: LinkElement,
    pub id: u32,
    pub contact_point: Option<ContactPoint>,
}

/// A longitudinal slice of a road with a fixed set of lanes, valid over
/// `[s, next_section.s)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneSection {
    pub(crate) id: SectionId,
    pub(crate) road: RoadId,
    pub(crate) s: f64,
    pub(crate) lanes: BTreeMap<LaneId, Lane>,
}

impl LaneSection {
    pub(crate) fn new(road: RoadId, id: SectionId, s: f64) -> Self {
        Self {
            id,
            road,
            s,
            lanes: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn road(&self) -> RoadId {
        self.road
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn lane(&self, id: LaneId) -> Option<&Lane> {
        self.lanes.get(&id)
    }

    /// Lanes ordered by id, right-most first.
    pub fn lanes(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.values()
    }

    pub fn min_lane_id(&self) -> Option<LaneId> {
        self.lanes.keys().next().copied()
    }

    pub fn max_lane_id(&self) -> Option<LaneId> {
        self.lanes.keys().next_back().copied()
    }

    /// Signed distance from the center lane to the middle of `lane` at `s`.
    ///
    /// Positive values are to the right of the heading, so right lanes
    /// (negative ids) get positive offsets.
    pub fn lateral_offset(&self, lane: LaneId, s: f64) -> f64 {
        if lane == 0 {
            return 0.0;
        }
        let inner: f64 = self
            .lanes
            .values()
            .filter(|l| l.id.signum() == lane.signum() && l.id.abs() < lane.abs())
            .map(|l| l.width(s))
            .sum();
        let own = self.lanes.get(&lane).map_or(0.0, |l| l.width(s));
        let distance = inner + own * 0.5;
        if lane < 0 { distance } else { -distance }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Road {
    pub(crate) id: RoadId,
    pub(crate) name: String,
    pub(crate) length: f64,
    pub(crate) junction_id: JuncId,
    pub(crate) predecessor: Option<RoadLink>,
    pub(crate) successor: Option<RoadLink>,
    pub(crate) nexts: Vec<RoadId>,
    pub(crate) prevs: Vec<RoadId>,
    pub(crate) geometries: Vec<Geometry>,
    pub(crate) sections: Vec<LaneSection>,
    pub(crate) infos: InfoSet<RoadInfo>,
}

impl Road {
    pub(crate) fn new(id: RoadId, name: String, length: f64, junction_id: JuncId) -> Self {
        Self {
            id,
            name,
            length,
            junction_id,
            predecessor: None,
            successor: None,
            nexts: Vec::new(),
            prevs: Vec::new(),
            geometries: Vec::new(),
            sections: Vec::new(),
            infos: InfoSet::default(),
        }
    }

    pub fn id(&self) -> RoadId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn junction_id(&self) -> JuncId {
        self.junction_id
    }

    pub fn is_junction(&self) -> bool {
        self.junction_id != -1
    }

    /// Predecessor element id, `0` when there is none.
    pub fn predecessor(&self) -> u32 {
        self.predecessor.map_or(0, |link| link.id)
    }

    /// Successor element id, `0` when there is none.
    pub fn successor(&self) -> u32 {
        self.successor.map_or(0, |link| link.id)
    }

    pub fn predecessor_link(&self) -> Option<&RoadLink> {
        self.predecessor.as_ref()
    }

    pub fn successor_link(&self) -> Option<&RoadLink> {
        self.successor.as_ref()
    }

    /// Roads reachable from the end of this road, without duplicates.
    pub fn nexts(&self) -> &[RoadId] {
        &self.nexts
    }

    pub fn prevs(&self) -> &[RoadId] {
        &self.prevs
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn sections(&self) -> &[LaneSection] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&LaneSection> {
        self.sections.get(id as usize)
    }

    /// Section whose `[s, next.s)` contains `s`; the first section for `s`
    /// before the road start. Sections are kept sorted by `s`.
    pub fn section_at(&self, s: f64) -> Option<&LaneSection> {
        self.sections
            .iter()
            .rev()
            .find(|section| section.s <= s)
            .or_else(|| self.sections.first())
    }

    pub fn lanes_at(&self, s: f64) -> impl Iterator<Item = &Lane> {
        self.section_at(s).into_iter().flat_map(|section| section.lanes())
    }

    /// Last plan-view segment starting at or before `s`.
    pub fn geometry_at(&self, s: f64) -> Option<&Geometry> {
        self.geometries
            .iter()
            .rev()
            .find(|g| g.s() <= s)
            .or_else(|| self.geometries.first())
    }

    pub fn info<K: InfoKind<RoadInfo>>(&self, s: f64) -> Option<&K> {
        self.infos.get::<K>(s)
    }

    pub fn infos<'a, K: InfoKind<RoadInfo> + 'a>(&'a self) -> impl Iterator<Item = &'a K> {
        self.infos.all::<K>()
    }

    pub fn elevation_at(&self, s: f64) -> f64 {
        self.info::<Elevation>(s).map_or(0.0, |e| e.evaluate(s))
    }

    pub fn lane_offset_at(&self, s: f64) -> f64 {
        self.info::<LaneOffset>(s).map_or(0.0, |o| o.evaluate(s))
    }

    pub fn speed_at(&self, s: f64) -> Option<&RoadSpeed> {
        self.info::<RoadSpeed>(s)
    }

    /// Center-lane point at `s`: reference line shifted by the lane offset,
    /// lifted to the elevation profile.
    pub fn directed_point(&self, s: f64) -> Option<DirectedPoint> {
        let s = clamp(s, 0.0, self.length);
        let mut point = self.directed_point_no_offset(s)?;
        point.apply_lateral_offset(-self.lane_offset_at(s));
        Some(point)
    }

    /// Middle of `lane` at `s`, with the point's tangent along the road.
    pub fn lane_point(&self, lane: &Lane, s: f64) -> Option<DirectedPoint> {
        let section = self.section(lane.section)?;
        let mut point = self.directed_point(s)?;
        point.apply_lateral_offset(section.lateral_offset(lane.id, s));
        Some(point)
    }

    /// End of a section: the next section's start, or the road length.
    pub fn section_end(&self, id: SectionId) -> f64 {
        self.sections
            .get(id as usize + 1)
            .map_or(self.length, |next| next.s)
    }

    /// Reference-line point at `s`, ignoring the lane offset.
    pub fn directed_point_no_offset(&self, s: f64) -> Option<DirectedPoint> {
        let s = clamp(s, 0.0, self.length);
        let geometry = self.geometry_at(s)?;
        let mut point = geometry.pos_from_dist(s - geometry.s());

        let elevation = self.info::<Elevation>(s);
        point.location.z = elevation.map_or(0.0, |e| e.evaluate(s));
        point.pitch = elevation.map_or(0.0, |e| e.tangent(s).atan());
        Some(point)
    }
}
