use roxmltree::Node;
use tracing::debug;

use super::{Attrs, children};
use crate::builder::MapBuilder;
use crate::ids::JuncId;
use crate::map::{Connection, ContactPoint, LaneLink};

pub(super) fn parse(root: Node<'_, '_>, builder: &mut MapBuilder) {
    for node in children(root, "junction") {
        let mut attrs = Attrs::new(node, &mut builder.diagnostics);
        let id: JuncId = attrs.i32("id");
        let name = attrs.string("name");
        builder.add_junction(id, name);

        for connection in children(node, "connection") {
            let connection = parse_connection(connection, builder);
            builder.add_connection(id, connection);
        }

        for controller in children(node, "controller") {
            let controller_id = Attrs::new(controller, &mut builder.diagnostics).string("id");
            builder.add_junction_controller(id, controller_id, controller.range());
        }
    }
    debug!(junctions = builder.map.junctions.len(), "junctions parsed");
}

fn parse_connection(node: Node<'_, '_>, builder: &mut MapBuilder) -> Connection {
    let mut attrs = Attrs::new(node, &mut builder.diagnostics);
    let mut connection = Connection {
        id: attrs.u32("id"),
        incoming_road: attrs.u32("incomingRoad"),
        connecting_road: attrs.u32("connectingRoad"),
        contact_point: ContactPoint::from_attribute(attrs.str("contactPoint")),
        lane_links: Vec::new(),
    };

    for link in children(node, "laneLink") {
        let mut attrs = Attrs::new(link, &mut builder.diagnostics);
        connection.lane_links.push(LaneLink {
            from: attrs.i32("from"),
            to: attrs.i32("to"),
        });
    }
    connection
}
