use std::ops::BitOr;

use serde::{Serialize, Serializer};

use super::info::{InfoKind, InfoSet, LaneInfo, LaneWidth};
use crate::ids::{LaneId, LaneKey, RoadId, SectionId};

/// Lane type as a bit set, so passes can filter with masks like
/// `LaneType::DRIVING | LaneType::SHOULDER`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneType(u32);

impl LaneType {
    pub const NONE: Self = Self(1);
    pub const DRIVING: Self = Self(1 << 1);
    pub const STOP: Self = Self(1 << 2);
    pub const SHOULDER: Self = Self(1 << 3);
    pub const BIKING: Self = Self(1 << 4);
    pub const SIDEWALK: Self = Self(1 << 5);
    pub const BORDER: Self = Self(1 << 6);
    pub const RESTRICTED: Self = Self(1 << 7);
    pub const PARKING: Self = Self(1 << 8);
    pub const BIDIRECTIONAL: Self = Self(1 << 9);
    pub const MEDIAN: Self = Self(1 << 10);
    pub const SPECIAL1: Self = Self(1 << 11);
    pub const SPECIAL2: Self = Self(1 << 12);
    pub const SPECIAL3: Self = Self(1 << 13);
    pub const ROAD_WORKS: Self = Self(1 << 14);
    pub const TRAM: Self = Self(1 << 15);
    pub const RAIL: Self = Self(1 << 16);
    pub const ENTRY: Self = Self(1 << 17);
    pub const EXIT: Self = Self(1 << 18);
    pub const OFF_RAMP: Self = Self(1 << 19);
    pub const ON_RAMP: Self = Self(1 << 20);
    /// Every type except `NONE`.
    pub const ANY: Self = Self(!1);

    const NAMES: [(Self, &'static str); 21] = [
        (Self::NONE, "none"),
        (Self::DRIVING, "driving"),
        (Self::STOP, "stop"),
        (Self::SHOULDER, "shoulder"),
        (Self::BIKING, "biking"),
        (Self::SIDEWALK, "sidewalk"),
        (Self::BORDER, "border"),
        (Self::RESTRICTED, "restricted"),
        (Self::PARKING, "parking"),
        (Self::BIDIRECTIONAL, "bidirectional"),
        (Self::MEDIAN, "median"),
        (Self::SPECIAL1, "special1"),
        (Self::SPECIAL2, "special2"),
        (Self::SPECIAL3, "special3"),
        (Self::ROAD_WORKS, "roadworks"),
        (Self::TRAM, "tram"),
        (Self::RAIL, "rail"),
        (Self::ENTRY, "entry"),
        (Self::EXIT, "exit"),
        (Self::OFF_RAMP, "offramp"),
        (Self::ON_RAMP, "onramp"),
    ];

    /// Case-insensitive; unknown names map to `NONE`.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        Self::NAMES
            .iter()
            .find(|(_, n)| *n == lower)
            .map_or(Self::NONE, |(t, _)| *t)
    }

    pub fn name(self) -> &'static str {
        if self == Self::ANY {
            return "any";
        }
        Self::NAMES
            .iter()
            .find(|(t, _)| *t == self)
            .map_or("mixed", |(_, n)| *n)
    }

    /// Whether every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for LaneType {
    fn default() -> Self {
        Self::NONE
    }
}

impl BitOr for LaneType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::fmt::Debug for LaneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LaneType({})", self.name())
    }
}

impl std::fmt::Display for LaneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for LaneType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One lane of one lane section.
///
/// `predecessor` and `successor` are the raw lane ids from `<link>`. The
/// resolved topology, including many-to-many edges through junctions, is in
/// `next_lanes` / `prev_lanes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lane {
    pub(crate) id: LaneId,
    pub(crate) lane_type: LaneType,
    pub(crate) level: bool,
    pub(crate) road: RoadId,
    pub(crate) section: SectionId,
    pub(crate) predecessor: LaneId,
    pub(crate) successor: LaneId,
    pub(crate) infos: InfoSet<LaneInfo>,
    pub(crate) next_lanes: Vec<LaneKey>,
    pub(crate) prev_lanes: Vec<LaneKey>,
}

impl Lane {
    pub(crate) fn new(key: LaneKey, lane_type: LaneType, level: bool) -> Self {
        Self {
            id: key.lane,
            lane_type,
            level,
            road: key.road,
            section: key.section,
            predecessor: 0,
            successor: 0,
            infos: InfoSet::default(),
            next_lanes: Vec::new(),
            prev_lanes: Vec::new(),
        }
    }

    pub fn id(&self) -> LaneId {
        self.id
    }

    pub fn key(&self) -> LaneKey {
        LaneKey::new(self.road, self.section, self.id)
    }

    pub fn lane_type(&self) -> LaneType {
        self.lane_type
    }

    pub fn level(&self) -> bool {
        self.level
    }

    pub fn road(&self) -> RoadId {
        self.road
    }

    pub fn section(&self) -> SectionId {
        self.section
    }

    pub fn predecessor(&self) -> LaneId {
        self.predecessor
    }

    pub fn successor(&self) -> LaneId {
        self.successor
    }

    /// Lanes reachable by driving off the end of this lane.
    pub fn next_lanes(&self) -> &[LaneKey] {
        &self.next_lanes
    }

    pub fn prev_lanes(&self) -> &[LaneKey] {
        &self.prev_lanes
    }

    /// Last record of kind `K` starting at or before `s`.
    pub fn info<K: InfoKind<LaneInfo>>(&self, s: f64) -> Option<&K> {
        self.infos.get::<K>(s)
    }

    pub fn infos<'a, K: InfoKind<LaneInfo> + 'a>(&'a self) -> impl Iterator<Item = &'a K> {
        self.infos.all::<K>()
    }

    pub fn records(&self) -> &InfoSet<LaneInfo> {
        &self.infos
    }

    /// Width at absolute road coordinate `s`; zero when no width record applies.
    pub fn width(&self, s: f64) -> f64 {
        self.info::<LaneWidth>(s).map_or(0.0, |w| w.evaluate(s))
    }
}
