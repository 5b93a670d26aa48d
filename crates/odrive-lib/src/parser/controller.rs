use indexmap::IndexSet;
use roxmltree::Node;

use super::{Attrs, children};
use crate::builder::MapBuilder;
use crate::map::Controller;

/// Top-level `<controller>` elements and the signals they `<control>`.
pub(super) fn parse(root: Node<'_, '_>, builder: &mut MapBuilder) {
    for node in children(root, "controller") {
        let mut attrs = Attrs::new(node, &mut builder.diagnostics);
        let id = attrs.string("id");
        let name = attrs.string("name");
        let sequence = attrs.u32("sequence");

        let signals: IndexSet<_> = children(node, "control")
            .filter_map(|control| control.attribute("signalId"))
            .map(str::to_string)
            .collect();

        let controller = Controller {
            id,
            name,
            sequence,
            signals,
            junctions: IndexSet::new(),
        };
        builder.add_controller(controller, node.range());
    }
}
