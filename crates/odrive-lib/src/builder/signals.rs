//! Signal placement and reference resolution.

use odrive_core::{Rotation, Transform};
use tracing::warn;

use super::BuilderContext;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ids::LaneId;
use crate::map::{Lane, LaneSection, LaneType, LaneValidity, Map, Orientation, Road, Signal};

/// Traffic lights sit this far ahead of their anchor, along their heading.
const TRAFFIC_LIGHT_FORWARD_SHIFT: f64 = 0.25;

/// Drops references that only cover the center lane.
pub(super) fn remove_zero_lane_validity_references(
    context: &mut BuilderContext,
    diagnostics: &mut Diagnostics,
) {
    context.references.retain(|pending| {
        let validities = &pending.reference.validities;
        let center_only =
            !validities.is_empty() && validities.iter().all(LaneValidity::is_center_only);
        if center_only {
            let signal = &pending.reference.signal_id;
            warn!(signal = %signal, road = pending.reference.road, "dropping center-lane reference");
            diagnostics
                .report(DiagnosticKind::ZeroLaneValidity, pending.span.clone())
                .message(format!("reference to `{signal}` dropped"))
                .emit();
        }
        !center_only
    });
}

/// Moves signals into the map with their world pose, then points every
/// reference at its signal.
pub(super) fn solve_references_and_transforms(
    map: &mut Map,
    context: &mut BuilderContext,
    diagnostics: &mut Diagnostics,
) {
    for (id, mut signal) in context.signals.drain(..) {
        if !signal.inertial
            && let Some(transform) = map
                .roads
                .get(&signal.road)
                .and_then(|road| signal_transform(road, &signal))
        {
            signal.transform = transform;
        }
        map.signals.insert(id, signal);
    }

    for pending in &mut context.references {
        let reference = &mut pending.reference;
        reference.signal = map.signals.get_index_of(&reference.signal_id);
        if reference.signal.is_none() {
            diagnostics
                .report(DiagnosticKind::UnresolvedSignal, pending.span.clone())
                .message(reference.signal_id.as_str())
                .emit();
        }
    }
}

/// World pose of a signal placed by `s`/`t` on its road.
///
/// `t` is measured from the reference line, positive to the left.
pub(super) fn signal_transform(road: &Road, signal: &Signal) -> Option<Transform> {
    let mut point = road.directed_point_no_offset(signal.s)?;
    point.apply_lateral_offset(-signal.t);
    point.location.z += signal.z_offset;

    let rotation = Rotation::new(signal.pitch, point.tangent + signal.h_offset, signal.roll);
    let mut location = point.location;
    if signal.is_traffic_light() {
        location += rotation.forward_vector() * TRAFFIC_LIGHT_FORWARD_SHIFT;
    }
    Some(Transform::new(location, rotation))
}

/// A reference without `<validity>` applies to every driving lane on the
/// side of the road its `t` puts it on. A reference on the reference line
/// falls back to its orientation.
pub(super) fn generate_default_validities(
    map: &Map,
    context: &mut BuilderContext,
    diagnostics: &mut Diagnostics,
) {
    for pending in &mut context.references {
        let reference = &mut pending.reference;
        if !reference.validities.is_empty() {
            continue;
        }
        let Some(section) = map
            .roads
            .get(&reference.road)
            .and_then(|road| road.section_at(reference.s))
        else {
            continue;
        };

        let (left, right) = if reference.t > 0.0 {
            (true, false)
        } else if reference.t < 0.0 {
            (false, true)
        } else {
            (
                matches!(reference.orientation, Orientation::Positive | Orientation::Both),
                matches!(reference.orientation, Orientation::Negative | Orientation::Both),
            )
        };
        if left {
            reference.validities.extend(driving_runs(section, |id| id > 0));
        }
        if right {
            reference.validities.extend(driving_runs(section, |id| id < 0));
        }

        let lanes = reference
            .validities
            .iter()
            .map(|v| format!("[{}, {}]", v.from_lane, v.to_lane))
            .collect::<Vec<_>>()
            .join(", ");
        let detail = if lanes.is_empty() {
            "no driving lanes on that side".to_string()
        } else {
            format!("using lanes {lanes}")
        };
        warn!(signal = %reference.signal_id, road = reference.road, "{detail}");
        diagnostics
            .report(DiagnosticKind::MissingValidity, pending.span.clone())
            .message(detail)
            .emit();
    }
}

/// Driving lanes of one side as intervals of consecutive ids.
fn driving_runs(section: &LaneSection, side: impl Fn(LaneId) -> bool) -> Vec<LaneValidity> {
    let mut runs: Vec<LaneValidity> = Vec::new();
    let driving = section
        .lanes()
        .filter(|lane| side(lane.id()) && lane.lane_type().contains(LaneType::DRIVING))
        .map(Lane::id);
    for id in driving {
        match runs.last_mut() {
            Some(run) if run.to_lane + 1 == id => run.to_lane = id,
            _ => runs.push(LaneValidity::new(id, id)),
        }
    }
    runs
}
