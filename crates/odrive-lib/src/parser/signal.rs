//! `<signals>` of every road: signals, their validities, dependencies and
//! inertial poses, and signal references.

use indexmap::IndexSet;
use odrive_core::{Location, Rotation, Transform};
use roxmltree::Node;
use tracing::debug;

use super::{Attrs, child, children, roads};
use crate::builder::{MapBuilder, SignalRefId};
use crate::ids::RoadId;
use crate::map::{Dependency, LaneValidity, Orientation, Signal};

pub(super) fn parse(root: Node<'_, '_>, builder: &mut MapBuilder) {
    for (road, node) in roads(root) {
        let Some(signals) = child(node, "signals") else {
            continue;
        };
        for signal in children(signals, "signal") {
            parse_signal(road, signal, builder);
        }
        for reference in children(signals, "signalReference") {
            parse_reference(road, reference, builder);
        }
    }
    debug!(
        signals = builder.context.signals.len(),
        references = builder.context.references.len(),
        "signals parsed"
    );
}

fn parse_signal(road: RoadId, node: Node<'_, '_>, builder: &mut MapBuilder) {
    let mut attrs = Attrs::new(node, &mut builder.diagnostics);
    let z_offset = if node.has_attribute("zOffset") {
        attrs.f64("zOffset")
    } else {
        attrs.f64("zOffSet")
    };
    let signal = Signal {
        id: attrs.string("id"),
        road,
        s: attrs.f64("s"),
        t: attrs.f64("t"),
        name: attrs.string("name"),
        dynamic: matches!(attrs.str("dynamic"), "yes" | "true" | "1"),
        orientation: Orientation::from_attribute(attrs.str("orientation")),
        z_offset,
        country: attrs.string("country"),
        kind: attrs.string("type"),
        subtype: attrs.string("subtype"),
        value: attrs.f64("value"),
        unit: attrs.string("unit"),
        height: attrs.f64("height"),
        width: attrs.f64("width"),
        text: attrs.string("text"),
        h_offset: attrs.f64("hOffset"),
        pitch: attrs.f64("pitch"),
        roll: attrs.f64("roll"),
        inertial: false,
        transform: Transform::default(),
        dependencies: Vec::new(),
        controllers: IndexSet::new(),
    };
    let id = signal.id.clone();
    let reference = builder.add_signal(signal, node.range());
    parse_validities(reference, node, builder);

    for dependency in children(node, "dependency") {
        let attrs = Attrs::new(dependency, &mut builder.diagnostics);
        let dependency = Dependency {
            id: attrs.string("id"),
            kind: attrs.string("type"),
        };
        builder.add_dependency(&id, dependency);
    }

    if let Some(inertial) = child(node, "positionInertial") {
        let mut attrs = Attrs::new(inertial, &mut builder.diagnostics);
        let location = Location::new(attrs.f64("x"), attrs.f64("y"), attrs.f64("z"));
        let rotation = Rotation::new(attrs.f64("pitch"), attrs.f64("hdg"), attrs.f64("roll"));
        builder.set_signal_inertial(&id, Transform::new(location, rotation));
    }
}

fn parse_reference(road: RoadId, node: Node<'_, '_>, builder: &mut MapBuilder) {
    let mut attrs = Attrs::new(node, &mut builder.diagnostics);
    let s = attrs.f64("s");
    let t = attrs.f64("t");
    let signal_id = attrs.string("id");
    let orientation = Orientation::from_attribute(attrs.str("orientation"));

    let reference =
        builder.add_signal_reference(road, signal_id, s, t, orientation, node.range());
    parse_validities(reference, node, builder);
}

fn parse_validities(reference: SignalRefId, node: Node<'_, '_>, builder: &mut MapBuilder) {
    for validity in children(node, "validity") {
        let mut attrs = Attrs::new(validity, &mut builder.diagnostics);
        let validity = LaneValidity::new(attrs.i32("fromLane"), attrs.i32("toLane"));
        builder.add_validity(reference, validity);
    }
}
