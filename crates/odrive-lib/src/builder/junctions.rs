//! Junction geometry: bounding boxes and road conflicts.

use odrive_core::math::segment_distance;
use odrive_core::{BoundingBox, Location, Vector2};

use crate::ids::{JuncId, RoadId};
use crate::load::LoadConfig;
use crate::map::{Lane, LaneType, Map, Road};

pub(super) fn create_bounding_boxes(map: &mut Map, config: &LoadConfig) {
    let intervals = config.bounding_box_intervals.max(1);
    for (id, bbox) in bounding_boxes(map, intervals) {
        if let Some(junction) = map.junctions.get_mut(&id) {
            junction.bounding_box = bbox;
        }
    }
}

fn bounding_boxes(map: &Map, intervals: usize) -> Vec<(JuncId, BoundingBox)> {
    map.junctions
        .keys()
        .filter_map(|&id| {
            let points = junction_roads(map, id).flat_map(|road| lane_samples(road, intervals));
            BoundingBox::from_points(points).map(|bbox| (id, bbox))
        })
        .collect()
}

/// `intervals + 1` points per lane centre line, over each section's extent.
fn lane_samples(road: &Road, intervals: usize) -> impl Iterator<Item = Location> + '_ {
    road.sections.iter().flat_map(move |section| {
        let (start, end) = (section.s, road.section_end(section.id));
        section
            .lanes()
            .filter(|lane| lane.id != 0)
            .flat_map(move |lane| {
                (0..=intervals).filter_map(move |i| {
                    let s = start + (end - start) * i as f64 / intervals as f64;
                    road.lane_point(lane, s).map(|p| p.location)
                })
            })
    })
}

/// Flags pairs of junction roads whose driving lanes come within
/// `conflict_tolerance` of each other.
pub(super) fn compute_road_conflicts(map: &mut Map, config: &LoadConfig) {
    let ids: Vec<JuncId> = map.junctions.keys().copied().collect();
    for id in ids {
        let polylines: Vec<(RoadId, Vec<Vector2>)> = junction_roads(map, id)
            .flat_map(|road| driving_polylines(road, config.conflict_sample_step))
            .collect();

        let mut conflicts = Vec::new();
        for (i, (road_a, line_a)) in polylines.iter().enumerate() {
            for (road_b, line_b) in &polylines[i + 1..] {
                if road_a == road_b || conflicts.contains(&(*road_a, *road_b)) {
                    continue;
                }
                if polylines_within(line_a, line_b, config.conflict_tolerance) {
                    conflicts.push((*road_a, *road_b));
                }
            }
        }

        if let Some(junction) = map.junctions.get_mut(&id) {
            for (a, b) in conflicts {
                junction.add_conflict(a, b);
            }
        }
    }
}

fn driving_polylines(road: &Road, step: f64) -> Vec<(RoadId, Vec<Vector2>)> {
    road.sections
        .iter()
        .flat_map(|section| {
            let (start, end) = (section.s, road.section_end(section.id));
            section
                .lanes()
                .filter(|lane| lane.id != 0 && lane.lane_type == LaneType::DRIVING)
                .map(move |lane| (road.id, sample_lane(road, lane, start, end, step)))
        })
        .collect()
}

fn sample_lane(road: &Road, lane: &Lane, start: f64, end: f64, step: f64) -> Vec<Vector2> {
    let length = end - start;
    let count = if step > 0.0 {
        (length / step).ceil().max(1.0) as usize
    } else {
        1
    };
    (0..=count)
        .filter_map(|i| road.lane_point(lane, start + length * i as f64 / count as f64))
        .map(|p| p.location.xy())
        .collect()
}

fn polylines_within(a: &[Vector2], b: &[Vector2], tolerance: f64) -> bool {
    a.windows(2).any(|sa| {
        b.windows(2)
            .any(|sb| segment_distance(sa[0], sa[1], sb[0], sb[1]) <= tolerance)
    })
}

fn junction_roads(map: &Map, junction: JuncId) -> impl Iterator<Item = &Road> {
    map.roads
        .values()
        .filter(move |road| road.junction_id == junction)
}
