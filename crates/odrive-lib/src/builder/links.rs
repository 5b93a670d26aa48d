//! Lane and road topology.
//!
//! Lanes with non-positive ids travel along `s` and continue through the
//! road's successor; lanes with positive ids travel against `s` and continue
//! through the predecessor. Inside a road, consecutive sections are linked by
//! the lane `<link>` ids; across roads the target is the first or last
//! section of the next road that still contains the target lane.

use crate::ids::{LaneId, LaneKey, RoadId};
use crate::map::{ContactPoint, Lane, LaneSection, LinkElement, Map, Road, RoadLink};

pub(super) fn create_pointers_between_road_segments(map: &mut Map) {
    retag_junction_links(map);

    let edges: Vec<(LaneKey, Vec<LaneKey>)> = map
        .roads
        .values()
        .flat_map(|road| road.sections.iter())
        .flat_map(|section| section.lanes())
        .map(|lane| (lane.key(), next_lanes_of(map, lane)))
        .collect();

    for (from, nexts) in edges {
        for to in &nexts {
            if let Some(lane) = map.lane_by_key_mut(*to)
                && !lane.prev_lanes.contains(&from)
            {
                lane.prev_lanes.push(from);
            }
        }
        if let Some(lane) = map.lane_by_key_mut(from) {
            lane.next_lanes = nexts;
        }
    }

    for road in map.roads.values_mut() {
        let id = road.id;
        let mut nexts = Vec::new();
        let mut prevs = Vec::new();
        for lane in road.sections.iter().flat_map(|section| section.lanes()) {
            collect_foreign_roads(&mut nexts, id, &lane.next_lanes);
            collect_foreign_roads(&mut prevs, id, &lane.prev_lanes);
        }
        road.nexts = nexts;
        road.prevs = prevs;
    }
}

/// A road link naming a missing road but an existing junction points at the
/// junction.
fn retag_junction_links(map: &mut Map) {
    let Map {
        roads, junctions, ..
    } = map;
    let road_ids: Vec<RoadId> = roads.keys().copied().collect();

    for road in roads.values_mut() {
        for link in [&mut road.predecessor, &mut road.successor]
            .into_iter()
            .flatten()
        {
            if link.element == LinkElement::Road
                && !road_ids.contains(&link.id)
                && junctions.contains_key(&(link.id as i32))
            {
                link.element = LinkElement::Junction;
            }
        }
    }
}

fn collect_foreign_roads(out: &mut Vec<RoadId>, own: RoadId, lanes: &[LaneKey]) {
    for key in lanes {
        if key.road != own && !out.contains(&key.road) {
            out.push(key.road);
        }
    }
}

fn next_lanes_of(map: &Map, lane: &Lane) -> Vec<LaneKey> {
    let Some(road) = map.roads.get(&lane.road) else {
        return Vec::new();
    };
    let section = lane.section as usize;
    let forward = lane.id <= 0;
    let (link, next_id) = if forward {
        (road.successor, lane.successor)
    } else {
        (road.predecessor, lane.predecessor)
    };
    let linked = next_id != 0 || lane.id == 0;

    let inside_road = if forward {
        section + 1 < road.sections.len()
    } else {
        section > 0
    };
    if inside_road {
        let target = if forward { section + 1 } else { section - 1 };
        return road
            .sections
            .get(target)
            .and_then(|s| s.lane(next_id))
            .filter(|_| linked)
            .map(Lane::key)
            .into_iter()
            .collect();
    }

    match link {
        Some(RoadLink {
            element: LinkElement::Road,
            id,
            ..
        }) => {
            if !linked {
                return Vec::new();
            }
            map.roads
                .get(&id)
                .and_then(|next| edge_lane(next, next_id <= 0, next_id))
                .into_iter()
                .collect()
        }
        Some(RoadLink {
            element: LinkElement::Junction,
            id,
            ..
        }) => through_junction(map, road.id, id as i32, lane.id),
        None => Vec::new(),
    }
}

fn through_junction(map: &Map, road: RoadId, junction: i32, lane: LaneId) -> Vec<LaneKey> {
    let Some(junction) = map.junctions.get(&junction) else {
        return Vec::new();
    };

    let mut result = Vec::new();
    for connection in junction.connections.values() {
        if connection.incoming_road != road {
            continue;
        }
        let Some(connecting) = map.roads.get(&connection.connecting_road) else {
            continue;
        };
        let from_start = connection.contact_point == Some(ContactPoint::Start);

        let targets: Vec<LaneId> = if lane == 0 {
            vec![0]
        } else {
            connection
                .lane_links
                .iter()
                .filter(|link| link.from == lane)
                .map(|link| link.to)
                .collect()
        };
        result.extend(
            targets
                .into_iter()
                .filter_map(|to| edge_lane(connecting, from_start, to)),
        );
    }
    result
}

/// `lane` in the first (`from_start`) or last section of `road` containing it.
fn edge_lane(road: &Road, from_start: bool, lane: LaneId) -> Option<LaneKey> {
    let contains = |section: &&LaneSection| section.lane(lane).is_some();
    let section = if from_start {
        road.sections.iter().find(contains)
    } else {
        road.sections.iter().rev().find(contains)
    }?;
    Some(LaneKey::new(road.id, section.id, lane))
}
