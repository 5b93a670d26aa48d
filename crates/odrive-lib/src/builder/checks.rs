//! Read-only checks on the sealed map.

use tracing::warn;

use super::BuilderContext;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ids::LaneId;
use crate::load::LoadConfig;
use crate::map::{LaneType, Map, Road, Signal};

/// Signal names that are painted on the road surface on purpose.
const ON_ROAD_MARKERS: &[&str] = &["Stencil_STOP", "STATIC"];

/// Warns about signals and `<signalReference>`s whose `t` lands inside a
/// driving lane.
///
/// A position overlaps when its distance to the lane centre is below
/// `signal_overlap_ratio` times the lane width. Nothing is moved.
pub(super) fn check_signals_on_roads(
    map: &Map,
    context: &BuilderContext,
    config: &LoadConfig,
    diagnostics: &mut Diagnostics,
) {
    let ratio = config.signal_overlap_ratio;

    for signal in map.signals.values() {
        if skips_overlap_check(signal) {
            continue;
        }
        let Some(road) = map.roads.get(&signal.road) else {
            continue;
        };
        let Some(lane) = overlapped_lane(road, signal.s, signal.t, ratio) else {
            continue;
        };

        warn!(signal = %signal.id, road = road.id, lane, "signal overlaps a driving lane");
        let span = context.signal_spans.get(&signal.id).cloned().unwrap_or_default();
        diagnostics
            .report(DiagnosticKind::SignalOnDrivingLane, span)
            .message(format!("`{}` sits on lane {lane} of road {}", signal.id, road.id))
            .emit();
    }

    // A signal's own reference shares its position and was checked above.
    let standalone = map
        .signal_references
        .iter()
        .zip(&context.reference_spans)
        .filter_map(|(reference, span)| Some((reference, span.clone()?)));
    for (reference, span) in standalone {
        let signal = reference.signal.and_then(|i| map.signals.get_index(i));
        if signal.is_some_and(|(_, signal)| skips_overlap_check(signal)) {
            continue;
        }
        let Some(road) = map.roads.get(&reference.road) else {
            continue;
        };
        let Some(lane) = overlapped_lane(road, reference.s, reference.t, ratio) else {
            continue;
        };

        let id = &reference.signal_id;
        warn!(signal = %id, road = road.id, lane, "signal reference overlaps a driving lane");
        diagnostics
            .report(DiagnosticKind::SignalOnDrivingLane, span)
            .message(format!("reference to `{id}` sits on lane {lane} of road {}", road.id))
            .emit();
    }
}

/// Driving lane whose centre is within `ratio` lane widths of `t` at `s`.
fn overlapped_lane(road: &Road, s: f64, t: f64, ratio: f64) -> Option<LaneId> {
    let section = road.section_at(s)?;
    let lane_offset = road.lane_offset_at(s);
    section
        .lanes()
        .find(|lane| {
            if lane.id == 0 || lane.lane_type != LaneType::DRIVING {
                return false;
            }
            let centre_t = lane_offset - section.lateral_offset(lane.id, s);
            (t - centre_t).abs() < ratio * lane.width(s)
        })
        .map(|lane| lane.id)
}

fn skips_overlap_check(signal: &Signal) -> bool {
    signal.inertial || ON_ROAD_MARKERS.iter().any(|m| signal.name.contains(m))
}
