use odrive_core::{CubicPolynomial, Geometry, ParamRange};
use roxmltree::Node;
use tracing::{debug, warn};

use super::{Attrs, child, children, roads};
use crate::builder::MapBuilder;
use crate::diagnostics::DiagnosticKind;
use crate::ids::RoadId;

pub(super) fn parse(root: Node<'_, '_>, builder: &mut MapBuilder) {
    for (road, node) in roads(root) {
        let Some(plan_view) = child(node, "planView") else {
            continue;
        };
        for geometry in children(plan_view, "geometry") {
            if let Some(segment) = parse_geometry(road, geometry, builder) {
                builder.add_geometry(road, segment);
            }
        }
        debug!(road, segments = builder.road_mut(road).geometries.len(), "plan view parsed");
    }
}

fn parse_geometry(road: RoadId, node: Node<'_, '_>, builder: &mut MapBuilder) -> Option<Geometry> {
    let mut attrs = Attrs::new(node, &mut builder.diagnostics);
    let s = attrs.f64("s");
    let x = attrs.f64("x");
    let y = attrs.f64("y");
    let heading = attrs.f64("hdg");
    let length = attrs.f64("length");

    if !(length.is_finite() && length > 0.0) {
        warn!(road, s, length, "skipping geometry without length");
        builder
            .diagnostics
            .report(DiagnosticKind::InvalidGeometry, node.range())
            .message(format!("length {length} at s={s}"))
            .emit();
        return None;
    }

    let Some(shape) = node.children().find(|n| n.is_element()) else {
        warn!(road, s, "skipping geometry without a shape");
        builder
            .diagnostics
            .report(DiagnosticKind::UnknownGeometryKind, node.range())
            .hint("expected one of line, arc, spiral, poly3, paramPoly3")
            .emit();
        return None;
    };

    let mut attrs = Attrs::new(shape, &mut builder.diagnostics);
    let segment = match shape.tag_name().name() {
        "line" => Geometry::line(s, x, y, heading, length),
        "arc" => Geometry::arc(s, x, y, heading, length, attrs.f64("curvature")),
        "spiral" => {
            let start = attrs.f64("curvStart");
            let end = attrs.f64("curvEnd");
            Geometry::spiral(s, x, y, heading, length, start, end)
        }
        "poly3" => Geometry::poly3(s, x, y, heading, length, attrs.poly(0.0)),
        "paramPoly3" => {
            let u = CubicPolynomial::new(
                attrs.f64("aU"),
                attrs.f64("bU"),
                attrs.f64("cU"),
                attrs.f64("dU"),
            );
            let v = CubicPolynomial::new(
                attrs.f64("aV"),
                attrs.f64("bV"),
                attrs.f64("cV"),
                attrs.f64("dV"),
            );
            let range = ParamRange::from_attribute(attrs.str("pRange"));
            Geometry::param_poly3(s, x, y, heading, length, u, v, range)
        }
        other => {
            warn!(road, s, kind = other, "skipping geometry of unknown kind");
            builder
                .diagnostics
                .report(DiagnosticKind::UnknownGeometryKind, shape.range())
                .message(other)
                .emit();
            return None;
        }
    };
    Some(segment)
}
