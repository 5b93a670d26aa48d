use roxmltree::Node;

use super::{Attrs, child, children, roads};
use crate::builder::MapBuilder;
use crate::ids::RoadId;
use crate::map::{CrossfallSide, Elevation, Lateral, LateralKind};

/// `<elevationProfile>` and `<lateralProfile>`.
pub(super) fn parse(root: Node<'_, '_>, builder: &mut MapBuilder) {
    for (road, node) in roads(root) {
        parse_elevation(road, child(node, "elevationProfile"), builder);
        if let Some(lateral) = child(node, "lateralProfile") {
            parse_lateral(road, lateral, builder);
        }
    }
}

/// A road without elevation records is flat.
fn parse_elevation(road: RoadId, profile: Option<Node<'_, '_>>, builder: &mut MapBuilder) {
    let mut found = false;
    for node in profile.into_iter().flat_map(|p| children(p, "elevation")) {
        let mut attrs = Attrs::new(node, &mut builder.diagnostics);
        let s = attrs.f64("s");
        let elevation = Elevation(attrs.poly(s));
        builder.add_road_info(road, elevation);
        found = true;
    }
    if !found {
        builder.add_road_info(road, Elevation(Default::default()));
    }
}

fn parse_lateral(road: RoadId, profile: Node<'_, '_>, builder: &mut MapBuilder) {
    for node in profile.children().filter(|n| n.is_element()) {
        let mut attrs = Attrs::new(node, &mut builder.diagnostics);
        let kind = match node.tag_name().name() {
            "superelevation" => LateralKind::Superelevation,
            "crossfall" => LateralKind::Crossfall {
                side: CrossfallSide::from_attribute(attrs.str("side")),
            },
            "shape" => LateralKind::Shape { t: attrs.f64("t") },
            _ => continue,
        };
        let s = attrs.f64("s");
        let lateral = Lateral {
            kind,
            poly: attrs.poly(s),
        };
        builder.add_road_info(road, lateral);
    }
}
