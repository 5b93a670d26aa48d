//! Per-lane records: width, border, road marks and the smaller attribute
//! elements. Every record is stored at `section.s + sOffset`.

use odrive_core::CubicPolynomial;
use roxmltree::Node;
use tracing::warn;

use super::{Attrs, child, children, roads};
use crate::builder::MapBuilder;
use crate::diagnostics::DiagnosticKind;
use crate::ids::{LaneId, LaneKey, RoadId, SectionId};
use crate::map::{
    Access, Height, LaneBorder, LaneChange, LaneInfo, LaneWidth, Material, RoadMark, RoadMarkLine,
    Rule, SpeedLimit, Visibility,
};

pub(super) fn parse(root: Node<'_, '_>, builder: &mut MapBuilder) {
    for (road, node) in roads(root) {
        let Some(lanes) = child(node, "lanes") else {
            continue;
        };
        for (index, section) in children(lanes, "laneSection").enumerate() {
            let index = index as SectionId;
            let Some(section_s) = builder
                .map
                .roads
                .get(&road)
                .and_then(|r| r.section(index))
                .map(|s| s.s())
            else {
                continue;
            };
            let sides = ["left", "center", "right"]
                .into_iter()
                .filter_map(|side| child(section, side));
            for lane in sides.flat_map(|side| children(side, "lane")) {
                parse_lane(road, index, section_s, lane, builder);
            }
        }
    }
}

fn parse_lane(
    road: RoadId,
    section: SectionId,
    section_s: f64,
    node: Node<'_, '_>,
    builder: &mut MapBuilder,
) {
    let Some(id) = node.attribute("id").and_then(|id| id.trim().parse::<LaneId>().ok()) else {
        return;
    };
    let key = LaneKey::new(road, section, id);
    if !builder.has_lane(key) {
        return;
    }

    let mut has_width = false;
    for record in node.children().filter(|n| n.is_element()) {
        let mut attrs = Attrs::new(record, &mut builder.diagnostics);
        let s = section_s + attrs.f64("sOffset");
        match record.tag_name().name() {
            "width" => {
                has_width = true;
                let width = LaneWidth(attrs.poly(s));
                builder.add_lane_info(key, width);
            }
            "border" => {
                let border = LaneBorder(attrs.poly(s));
                builder.add_lane_info(key, border);
            }
            "roadMark" => {
                let index = builder.context.lane_infos.get(&key).map_or(0, |infos| {
                    infos
                        .iter()
                        .filter(|info| matches!(info, LaneInfo::Mark(_)))
                        .count()
                });
                let mark = road_mark(record, s, index as u32, builder);
                builder.add_lane_info(key, mark);
            }
            "material" => {
                let material = Material {
                    s,
                    surface: attrs.string("surface"),
                    friction: attrs.f64("friction"),
                    roughness: attrs.f64("roughness"),
                };
                builder.add_lane_info(key, material);
            }
            "visibility" => {
                let visibility = Visibility {
                    s,
                    forward: attrs.f64("forward"),
                    back: attrs.f64("back"),
                    left: attrs.f64("left"),
                    right: attrs.f64("right"),
                };
                builder.add_lane_info(key, visibility);
            }
            "speed" => {
                let speed = SpeedLimit {
                    s,
                    max: attrs.f64("max"),
                    unit: attrs.string("unit"),
                };
                builder.add_lane_info(key, speed);
            }
            "access" => {
                let access = Access {
                    s,
                    restriction: attrs.string("restriction"),
                };
                builder.add_lane_info(key, access);
            }
            "height" => {
                let height = Height {
                    s,
                    inner: attrs.f64("inner"),
                    outer: attrs.f64("outer"),
                };
                builder.add_lane_info(key, height);
            }
            "rule" => {
                let rule = Rule {
                    s,
                    value: attrs.string("value"),
                };
                builder.add_lane_info(key, rule);
            }
            _ => {}
        }
    }

    if !has_width && id != 0 {
        warn!(road, lane = id, s = section_s, "lane has no width, using zero");
        builder
            .diagnostics
            .report(DiagnosticKind::MissingLaneWidth, node.range())
            .message(format!("lane {id} of road {road}, using zero"))
            .emit();
        let zero = CubicPolynomial::with_offset(0.0, 0.0, 0.0, 0.0, section_s);
        builder.add_lane_info(key, LaneWidth(zero));
    }
}

fn road_mark(node: Node<'_, '_>, s: f64, index: u32, builder: &mut MapBuilder) -> RoadMark {
    let mut attrs = Attrs::new(node, &mut builder.diagnostics);
    let mut mark = RoadMark {
        s,
        index,
        kind: attrs.string("type"),
        weight: attrs.string("weight"),
        color: attrs.string("color"),
        material: attrs.string("material"),
        width: attrs.f64("width"),
        lane_change: LaneChange::from_attribute(attrs.str("laneChange")),
        height: attrs.f64("height"),
        type_name: String::new(),
        type_width: 0.0,
        lines: Vec::new(),
    };

    if let Some(kind) = child(node, "type") {
        let mut attrs = Attrs::new(kind, &mut builder.diagnostics);
        mark.type_name = attrs.string("name");
        mark.type_width = attrs.f64("width");
        for line in children(kind, "line") {
            let mut attrs = Attrs::new(line, &mut builder.diagnostics);
            mark.lines.push(RoadMarkLine {
                s: s + attrs.f64("sOffset"),
                length: attrs.f64("length"),
                space: attrs.f64("space"),
                t_offset: attrs.f64("tOffset"),
                rule: attrs.string("rule"),
                width: attrs.f64("width"),
            });
        }
    }
    mark
}
