//! Invariant checks excluded from coverage reports.
//!
//! Every road, section and lane a parser refers to was created by the road
//! parser from the same document. A miss here is a bug in the loader, not in
//! the input.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::PendingReference;
use crate::ids::{LaneKey, RoadId};
use crate::map::{Lane, LaneSection, Road};

#[inline]
pub(super) fn ensure_road(road: Option<&mut Road>, id: RoadId) -> &mut Road {
    match road {
        Some(road) => road,
        None => panic!("road {id} was never created by the road parser"),
    }
}

#[inline]
pub(super) fn ensure_section(section: Option<&mut LaneSection>, key: LaneKey) -> &mut LaneSection {
    match section {
        Some(section) => section,
        None => panic!("lane section for {key} was never created by the road parser"),
    }
}

#[inline]
pub(super) fn ensure_lane(lane: Option<&mut Lane>, key: LaneKey) -> &mut Lane {
    match lane {
        Some(lane) => lane,
        None => panic!("{key} was never created by the road parser"),
    }
}

#[inline]
pub(super) fn ensure_reference(reference: Option<&mut PendingReference>) -> &mut PendingReference {
    match reference {
        Some(reference) => reference,
        None => panic!("signal reference handle outlived its builder"),
    }
}
