//! Element parsers.
//!
//! Each parser walks one part of the document and feeds the builder. None of
//! them reads another's output; the road parser only has to run first because
//! it creates the roads, sections and lanes the others attach records to.

mod controller;
mod geo_reference;
mod geometry;
mod junction;
mod lane;
mod profiles;
mod road;
mod signal;
mod traffic_group;

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::str::FromStr;

use odrive_core::CubicPolynomial;
use roxmltree::Node;
use tracing::debug;

use crate::builder::MapBuilder;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ids::RoadId;

pub(crate) fn parse(root: Node<'_, '_>, builder: &mut MapBuilder) {
    geo_reference::parse(root, builder);
    road::parse(root, builder);
    debug!(roads = builder.map.roads.len(), "roads created");

    geometry::parse(root, builder);
    lane::parse(root, builder);
    profiles::parse(root, builder);
    junction::parse(root, builder);
    signal::parse(root, builder);
    controller::parse(root, builder);
    traffic_group::parse(root, builder);
}

/// Element children of `node` named `name`.
pub(super) fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

pub(super) fn child<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> Option<Node<'a, 'input>> {
    children(node, name).next()
}

/// `<road>` elements with a valid id, first occurrence of each id only.
///
/// Matches the roads the road parser creates, so every parser that attaches
/// records to a road can rely on it existing.
pub(super) fn roads<'a, 'input: 'a>(root: Node<'a, 'input>) -> Vec<(RoadId, Node<'a, 'input>)> {
    let mut seen = HashSet::new();
    children(root, "road")
        .filter_map(|node| {
            let id = node.attribute("id")?.trim().parse::<RoadId>().ok()?;
            seen.insert(id).then_some((id, node))
        })
        .collect()
}

/// Typed attribute reads on one element.
///
/// Absent attributes read as the type's default. Present but malformed ones
/// also read as the default and report `InvalidAttribute` on the element.
pub(super) struct Attrs<'a, 'input, 'd> {
    node: Node<'a, 'input>,
    diagnostics: &'d mut Diagnostics,
}

impl<'a, 'input: 'a, 'd> Attrs<'a, 'input, 'd> {
    pub(super) fn new(node: Node<'a, 'input>, diagnostics: &'d mut Diagnostics) -> Self {
        Self { node, diagnostics }
    }

    pub(super) fn str(&self, name: &str) -> &'a str {
        self.node.attribute(name).unwrap_or_default()
    }

    pub(super) fn string(&self, name: &str) -> String {
        self.str(name).to_string()
    }

    pub(super) fn flag(&self, name: &str) -> bool {
        matches!(self.str(name).trim(), "true" | "1")
    }

    /// `inf` and `NaN` parse as floats but are malformed here.
    pub(super) fn f64(&mut self, name: &str) -> f64 {
        let value: f64 = self.parse_or(name, 0.0);
        if value.is_finite() {
            return value;
        }
        self.report_invalid(name);
        0.0
    }

    pub(super) fn i32(&mut self, name: &str) -> i32 {
        self.parse_or(name, 0)
    }

    pub(super) fn u32(&mut self, name: &str) -> u32 {
        self.parse_or(name, 0)
    }

    /// `a b c d` of a cubic record anchored at absolute `s`.
    pub(super) fn poly(&mut self, s: f64) -> CubicPolynomial {
        CubicPolynomial::with_offset(self.f64("a"), self.f64("b"), self.f64("c"), self.f64("d"), s)
    }

    pub(super) fn parse_or<T: FromStr>(&mut self, name: &str, default: T) -> T {
        let Some(text) = self.node.attribute(name) else {
            return default;
        };
        match text.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                self.report_invalid(name);
                default
            }
        }
    }

    fn report_invalid(&mut self, name: &str) {
        let text = self.str(name);
        self.diagnostics
            .report(DiagnosticKind::InvalidAttribute, self.node.range())
            .message(format!("{name}=\"{text}\""))
            .hint(format!("on <{}>", self.node.tag_name().name()))
            .emit();
    }
}
