//! Roads, their links and speed records, plus the lane sections and lanes
//! every other parser attaches to.

use roxmltree::Node;

use super::{Attrs, child, children};
use crate::builder::MapBuilder;
use crate::diagnostics::DiagnosticKind;
use crate::ids::{LaneId, LaneKey, RoadId, SectionId};
use crate::map::{ContactPoint, LaneOffset, LaneType, LinkElement, Road, RoadLink, RoadSpeed};

const SIDES: [&str; 3] = ["left", "center", "right"];

pub(super) fn parse(root: Node<'_, '_>, builder: &mut MapBuilder) {
    for node in children(root, "road") {
        let raw_id = node.attribute("id").unwrap_or_default();
        let Ok(id) = raw_id.trim().parse::<RoadId>() else {
            builder
                .diagnostics
                .report(DiagnosticKind::InvalidAttribute, node.range())
                .message(format!("id=\"{raw_id}\""))
                .hint("road ids are non-negative integers; the road is skipped")
                .emit();
            continue;
        };
        if builder.has_road(id) {
            builder
                .diagnostics
                .report(DiagnosticKind::InvalidAttribute, node.range())
                .message(format!("id=\"{raw_id}\" is used twice"))
                .hint("only the first road with this id is kept")
                .emit();
            continue;
        }

        let mut attrs = Attrs::new(node, &mut builder.diagnostics);
        let name = attrs.string("name");
        let length = attrs.f64("length");
        let junction = attrs.parse_or("junction", -1);
        builder.add_road(Road::new(id, name, length, junction));

        if let Some(link) = child(node, "link") {
            let predecessor = child(link, "predecessor").map(|n| road_link(n, builder));
            let successor = child(link, "successor").map(|n| road_link(n, builder));
            let road = builder.road_mut(id);
            road.predecessor = predecessor;
            road.successor = successor;
        }

        for kind in children(node, "type") {
            let speed = speed_record(kind, builder);
            builder.add_road_info(id, speed);
        }

        if let Some(lanes) = child(node, "lanes") {
            parse_lane_offsets(id, lanes, builder);
            for section in children(lanes, "laneSection") {
                parse_section(id, section, builder);
            }
        } else {
            builder.add_road_info(id, LaneOffset(Default::default()));
        }
    }
}

fn road_link(node: Node<'_, '_>, builder: &mut MapBuilder) -> RoadLink {
    let mut attrs = Attrs::new(node, &mut builder.diagnostics);
    let element = match attrs.str("elementType") {
        "junction" => LinkElement::Junction,
        _ => LinkElement::Road,
    };
    RoadLink {
        element,
        id: attrs.u32("elementId"),
        contact_point: ContactPoint::from_attribute(attrs.str("contactPoint")),
    }
}

fn speed_record(node: Node<'_, '_>, builder: &mut MapBuilder) -> RoadSpeed {
    let mut attrs = Attrs::new(node, &mut builder.diagnostics);
    let s = attrs.f64("s");
    let road_type = attrs.string("type");

    let (max, unit) = match child(node, "speed") {
        Some(speed) => {
            let mut attrs = Attrs::new(speed, &mut builder.diagnostics);
            let max = match attrs.str("max") {
                "no limit" | "undefined" => 0.0,
                _ => attrs.f64("max"),
            };
            (max, attrs.string("unit"))
        }
        None => (0.0, String::new()),
    };

    RoadSpeed {
        s,
        road_type,
        max,
        unit,
    }
}

fn parse_lane_offsets(road: RoadId, lanes: Node<'_, '_>, builder: &mut MapBuilder) {
    let mut found = false;
    for node in children(lanes, "laneOffset") {
        let mut attrs = Attrs::new(node, &mut builder.diagnostics);
        let s = attrs.f64("s");
        let offset = LaneOffset(attrs.poly(s));
        builder.add_road_info(road, offset);
        found = true;
    }
    if !found {
        builder.add_road_info(road, LaneOffset(Default::default()));
    }
}

fn parse_section(road: RoadId, node: Node<'_, '_>, builder: &mut MapBuilder) {
    let s = Attrs::new(node, &mut builder.diagnostics).f64("s");
    let section = builder.add_section(road, s);

    for side in SIDES.into_iter().filter_map(|side| child(node, side)) {
        for lane in children(side, "lane") {
            parse_lane(road, section, lane, builder);
        }
    }
}

fn parse_lane(road: RoadId, section: SectionId, node: Node<'_, '_>, builder: &mut MapBuilder) {
    let raw_id = node.attribute("id").unwrap_or_default();
    let Ok(id) = raw_id.trim().parse::<LaneId>() else {
        builder
            .diagnostics
            .report(DiagnosticKind::InvalidAttribute, node.range())
            .message(format!("id=\"{raw_id}\""))
            .hint("the lane is skipped")
            .emit();
        return;
    };

    let attrs = Attrs::new(node, &mut builder.diagnostics);
    let lane_type = LaneType::from_name(attrs.str("type"));
    let level = attrs.flag("level");

    let link = child(node, "link");
    let mut linked = |name: &'static str| {
        link.and_then(|l| child(l, name))
            .map_or(0, |n| Attrs::new(n, &mut builder.diagnostics).i32("id"))
    };
    let predecessor = linked("predecessor");
    let successor = linked("successor");

    builder.add_lane(
        LaneKey::new(road, section, id),
        lane_type,
        level,
        predecessor,
        successor,
    );
}
