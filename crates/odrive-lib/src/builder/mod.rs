//! Accumulates parsed facts and resolves them into a [`Map`].
//!
//! Parsers only append: roads, sections and lanes are created eagerly by the
//! road parser, every other record lands in a temporary container keyed by
//! id. [`MapBuilder::build`] then runs the resolution passes in a fixed order
//! and seals the result.

mod checks;
mod controllers;
mod invariants;
mod junctions;
mod links;
mod signals;

#[cfg(test)]
mod signals_tests;

use std::ops::Range;

use indexmap::IndexMap;
use odrive_core::{Geometry, Transform};
use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::ids::{ContId, JuncId, LaneId, LaneKey, RoadId, SectionId, SignId};
use crate::load::LoadConfig;
use crate::map::{
    Connection, Controller, Dependency, GeoReference, Junction, Lane, LaneInfo, LaneSection,
    LaneType, LaneValidity, Map, Orientation, Road, RoadInfo, Signal, SignalReference,
    TrafficGroup,
};

/// Reference `s` stays strictly inside the road.
const REFERENCE_S_EPSILON: f64 = 1e-5;

/// Handle to a pending signal reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SignalRefId(usize);

#[derive(Debug)]
pub(crate) struct PendingReference {
    pub(crate) reference: SignalReference,
    pub(crate) span: Range<usize>,
    /// From a `<signalReference>` element, not a signal's own reference.
    pub(crate) standalone: bool,
}

/// A `<controller>` listing a signal, or a junction listing a controller.
#[derive(Debug)]
pub(crate) struct PendingLink<From, To> {
    pub(crate) from: From,
    pub(crate) to: To,
    pub(crate) span: Range<usize>,
}

/// Temporary containers, dropped once the map is sealed.
#[derive(Debug, Default)]
pub(crate) struct BuilderContext {
    pub(crate) road_infos: IndexMap<RoadId, Vec<RoadInfo>>,
    pub(crate) lane_infos: IndexMap<LaneKey, Vec<LaneInfo>>,
    pub(crate) signals: IndexMap<SignId, Signal>,
    pub(crate) signal_spans: IndexMap<SignId, Range<usize>>,
    pub(crate) references: Vec<PendingReference>,
    /// Parallel to the sealed map's references; `None` for a signal's own.
    pub(crate) reference_spans: Vec<Option<Range<usize>>>,
    pub(crate) controller_signals: Vec<PendingLink<ContId, SignId>>,
    pub(crate) junction_controllers: Vec<PendingLink<JuncId, ContId>>,
}

#[derive(Debug, Default)]
pub(crate) struct MapBuilder {
    pub(crate) map: Map,
    pub(crate) context: BuilderContext,
    pub(crate) diagnostics: Diagnostics,
}

impl MapBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Roads, sections, lanes
    // ------------------------------------------------------------------------

    pub(crate) fn set_geo_reference(&mut self, geo_reference: GeoReference) {
        self.map.geo_reference = geo_reference;
    }

    pub(crate) fn add_road(&mut self, road: Road) {
        self.map.roads.insert(road.id, road);
    }

    pub(crate) fn has_road(&self, id: RoadId) -> bool {
        self.map.roads.contains_key(&id)
    }

    pub(crate) fn road_mut(&mut self, id: RoadId) -> &mut Road {
        let road = self.map.roads.get_mut(&id);
        invariants::ensure_road(road, id)
    }

    pub(crate) fn add_road_info(&mut self, road: RoadId, info: impl Into<RoadInfo>) {
        self.context
            .road_infos
            .entry(road)
            .or_default()
            .push(info.into());
    }

    pub(crate) fn add_geometry(&mut self, road: RoadId, geometry: Geometry) {
        self.road_mut(road).geometries.push(geometry);
    }

    pub(crate) fn add_section(&mut self, road: RoadId, s: f64) -> SectionId {
        let road = self.road_mut(road);
        let id = road.sections.len() as SectionId;
        road.sections.push(LaneSection::new(road.id, id, s));
        id
    }

    pub(crate) fn add_lane(
        &mut self,
        key: LaneKey,
        lane_type: LaneType,
        level: bool,
        predecessor: LaneId,
        successor: LaneId,
    ) {
        let section = invariants::ensure_section(
            self.road_mut(key.road).sections.get_mut(key.section as usize),
            key,
        );
        let mut lane = Lane::new(key, lane_type, level);
        lane.predecessor = predecessor;
        lane.successor = successor;
        section.lanes.insert(key.lane, lane);
    }

    pub(crate) fn has_lane(&self, key: LaneKey) -> bool {
        self.map.lane_by_key(key).is_some()
    }

    pub(crate) fn add_lane_info(&mut self, key: LaneKey, info: impl Into<LaneInfo>) {
        self.context
            .lane_infos
            .entry(key)
            .or_default()
            .push(info.into());
    }

    // ------------------------------------------------------------------------
    // Junctions
    // ------------------------------------------------------------------------

    pub(crate) fn add_junction(&mut self, id: JuncId, name: String) {
        self.map
            .junctions
            .entry(id)
            .or_insert_with(|| Junction::new(id, name));
    }

    pub(crate) fn add_connection(&mut self, junction: JuncId, connection: Connection) {
        if let Some(j) = self.map.junctions.get_mut(&junction) {
            j.connections.insert(connection.id, connection);
        }
    }

    pub(crate) fn add_junction_controller(
        &mut self,
        junction: JuncId,
        controller: ContId,
        span: Range<usize>,
    ) {
        if let Some(j) = self.map.junctions.get_mut(&junction) {
            j.controllers.insert(controller.clone());
        }
        self.context.junction_controllers.push(PendingLink {
            from: junction,
            to: controller,
            span,
        });
    }

    // ------------------------------------------------------------------------
    // Signals
    // ------------------------------------------------------------------------

    /// Registers a signal together with the reference at its own position.
    pub(crate) fn add_signal(&mut self, signal: Signal, span: Range<usize>) -> SignalRefId {
        let reference = self.add_signal_reference(
            signal.road,
            signal.id.clone(),
            signal.s,
            signal.t,
            signal.orientation,
            span.clone(),
        );
        invariants::ensure_reference(self.context.references.get_mut(reference.0)).standalone =
            false;
        self.context.signal_spans.insert(signal.id.clone(), span);
        self.context.signals.insert(signal.id.clone(), signal);
        reference
    }

    pub(crate) fn add_signal_reference(
        &mut self,
        road: RoadId,
        signal_id: SignId,
        s: f64,
        t: f64,
        orientation: Orientation,
        span: Range<usize>,
    ) -> SignalRefId {
        let length = self.road_mut(road).length;
        let s = odrive_core::math::clamp(s, 0.0, length - REFERENCE_S_EPSILON);
        let id = SignalRefId(self.context.references.len());
        self.context.references.push(PendingReference {
            reference: SignalReference {
                road,
                signal_id,
                s,
                t,
                orientation,
                validities: Vec::new(),
                signal: None,
            },
            span,
            standalone: true,
        });
        id
    }

    pub(crate) fn add_validity(&mut self, reference: SignalRefId, validity: LaneValidity) {
        let pending = invariants::ensure_reference(self.context.references.get_mut(reference.0));
        pending.reference.validities.push(validity);
    }

    pub(crate) fn add_dependency(&mut self, signal: &str, dependency: Dependency) {
        if let Some(signal) = self.context.signals.get_mut(signal) {
            signal.dependencies.push(dependency);
        }
    }

    /// Pins a signal to an explicit world pose instead of its road position.
    pub(crate) fn set_signal_inertial(&mut self, signal: &str, transform: Transform) {
        if let Some(signal) = self.context.signals.get_mut(signal) {
            signal.inertial = true;
            signal.transform = transform;
        }
    }

    // ------------------------------------------------------------------------
    // Controllers and traffic groups
    // ------------------------------------------------------------------------

    pub(crate) fn add_controller(&mut self, controller: Controller, span: Range<usize>) {
        for signal in &controller.signals {
            self.context.controller_signals.push(PendingLink {
                from: controller.id.clone(),
                to: signal.clone(),
                span: span.clone(),
            });
        }
        self.map.controllers.insert(controller.id.clone(), controller);
    }

    pub(crate) fn add_traffic_group(&mut self, group: TrafficGroup) {
        self.map.traffic_groups.push(group);
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    /// Runs every resolution pass and seals the map.
    ///
    /// Consumes the builder: a sealed map cannot be built twice.
    pub(crate) fn build(mut self, config: &LoadConfig) -> (Map, Diagnostics) {
        self.order_road_segments();

        debug!(roads = self.map.roads.len(), "linking road segments");
        links::create_pointers_between_road_segments(&mut self.map);

        signals::remove_zero_lane_validity_references(&mut self.context, &mut self.diagnostics);
        self.move_infos();

        debug!(
            signals = self.context.signals.len(),
            references = self.context.references.len(),
            "solving signal references"
        );
        signals::solve_references_and_transforms(
            &mut self.map,
            &mut self.context,
            &mut self.diagnostics,
        );
        signals::generate_default_validities(&self.map, &mut self.context, &mut self.diagnostics);
        let (references, spans): (Vec<_>, Vec<_>) = self
            .context
            .references
            .drain(..)
            .map(|pending| {
                let span = pending.standalone.then_some(pending.span);
                (pending.reference, span)
            })
            .unzip();
        self.map.signal_references = references;
        self.context.reference_spans = spans;

        controllers::solve_controller_and_junction_references(
            &mut self.map,
            &self.context,
            &mut self.diagnostics,
        );

        let Self {
            mut map,
            context,
            mut diagnostics,
        } = self;

        debug!(junctions = map.junctions.len(), "computing junction geometry");
        junctions::create_bounding_boxes(&mut map, config);
        junctions::compute_road_conflicts(&mut map, config);
        checks::check_signals_on_roads(&map, &context, config, &mut diagnostics);

        (map, diagnostics)
    }

    /// Puts geometries and lane sections in `s` order. Sections are
    /// renumbered, and pending lane records follow their section.
    fn order_road_segments(&mut self) {
        let mut renumbered: IndexMap<(RoadId, SectionId), SectionId> = IndexMap::new();
        for road in self.map.roads.values_mut() {
            road.geometries.sort_by(|a, b| a.s().total_cmp(&b.s()));
            if road.sections.is_sorted_by(|a, b| a.s <= b.s) {
                continue;
            }

            debug!(road = road.id, "reordering lane sections by s");
            road.sections.sort_by(|a, b| a.s.total_cmp(&b.s));
            for (index, section) in road.sections.iter_mut().enumerate() {
                let id = index as SectionId;
                if section.id != id {
                    renumbered.insert((road.id, section.id), id);
                }
                section.id = id;
                for lane in section.lanes.values_mut() {
                    lane.section = id;
                }
            }
        }
        if renumbered.is_empty() {
            return;
        }

        self.context.lane_infos = std::mem::take(&mut self.context.lane_infos)
            .into_iter()
            .map(|(key, infos)| {
                let section = renumbered
                    .get(&(key.road, key.section))
                    .copied()
                    .unwrap_or(key.section);
                (LaneKey::new(key.road, section, key.lane), infos)
            })
            .collect();
    }

    /// Moves the temporary info lists onto their roads and lanes.
    fn move_infos(&mut self) {
        for (road, infos) in std::mem::take(&mut self.context.road_infos) {
            let road = self.road_mut(road);
            for info in infos {
                road.infos.push(info);
            }
        }

        for (key, infos) in std::mem::take(&mut self.context.lane_infos) {
            let lane = invariants::ensure_lane(self.map.lane_by_key_mut(key), key);
            for info in infos {
                lane.infos.push(info);
            }
        }
    }
}
