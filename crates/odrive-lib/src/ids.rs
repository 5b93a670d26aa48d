//! Identifiers assigned by the source document.
//!
//! None of these are generated: every id comes from an attribute in the
//! OpenDRIVE file and is only unique within its own namespace.

use serde::Serialize;

pub type RoadId = u32;
/// Signed lane id. `0` is the center lane, negative ids are right of the
/// reference line, positive ids left of it.
pub type LaneId = i32;
/// `-1` means "not part of a junction".
pub type JuncId = i32;
/// Index of a lane section within its road, in `s` order.
pub type SectionId = u32;
pub type ConId = u32;
pub type SignId = String;
pub type ContId = String;

/// Stable handle to one lane: road, lane section, lane id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LaneKey {
    pub road: RoadId,
    pub section: SectionId,
    pub lane: LaneId,
}

impl LaneKey {
    pub const fn new(road: RoadId, section: SectionId, lane: LaneId) -> Self {
        Self {
            road,
            section,
            lane,
        }
    }
}

impl std::fmt::Display for LaneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "road {} section {} lane {}", self.road, self.section, self.lane)
    }
}
