use roxmltree::Node;

use super::{Attrs, children};
use crate::builder::MapBuilder;
use crate::map::TrafficGroup;

/// `<trafficgroup>` timing records.
pub(super) fn parse(root: Node<'_, '_>, builder: &mut MapBuilder) {
    for node in children(root, "trafficgroup") {
        let mut attrs = Attrs::new(node, &mut builder.diagnostics);
        let group = TrafficGroup {
            id: attrs.string("id"),
            red_time: attrs.f64("redTime"),
            yellow_time: attrs.f64("yellowTime"),
            green_time: attrs.f64("greenTime"),
            lights: children(node, "trafficlight")
                .filter_map(|light| light.attribute("id"))
                .map(str::to_string)
                .collect(),
        };
        builder.add_traffic_group(group);
    }
}
