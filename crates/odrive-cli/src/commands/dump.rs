//! JSON summary of a compiled map.

use std::path::PathBuf;

use odrive_core::{BoundingBox, Transform};
use odrive_lib::LoadConfig;
use odrive_lib::ids::{JuncId, LaneId, LaneKey, RoadId};
use odrive_lib::map::{GeoReference, LaneValidity, Map};
use serde::Serialize;

use super::input::load_or_exit;

pub struct DumpArgs {
    pub input: PathBuf,
    pub compact: bool,
    pub config: LoadConfig,
}

pub fn run(args: DumpArgs) {
    let (_, map, _) = load_or_exit(&args.input, args.config);

    match render(&map, args.compact) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}

pub fn render(map: &Map, compact: bool) -> serde_json::Result<String> {
    let summary = Summary::new(map);
    if compact {
        serde_json::to_string(&summary)
    } else {
        serde_json::to_string_pretty(&summary)
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    geo_reference: GeoReference,
    roads: Vec<RoadSummary<'a>>,
    junctions: Vec<JunctionSummary<'a>>,
    signals: Vec<SignalSummary<'a>>,
    references: Vec<ReferenceSummary<'a>>,
}

#[derive(Serialize)]
struct RoadSummary<'a> {
    id: RoadId,
    name: &'a str,
    length: f64,
    junction: JuncId,
    nexts: &'a [RoadId],
    prevs: &'a [RoadId],
    sections: Vec<SectionSummary<'a>>,
}

#[derive(Serialize)]
struct SectionSummary<'a> {
    s: f64,
    lanes: Vec<LaneSummary<'a>>,
}

#[derive(Serialize)]
struct LaneSummary<'a> {
    id: LaneId,
    #[serde(rename = "type")]
    lane_type: &'static str,
    /// Width at the section start.
    width: f64,
    next: &'a [LaneKey],
}

#[derive(Serialize)]
struct JunctionSummary<'a> {
    id: JuncId,
    name: &'a str,
    bounding_box: BoundingBox,
    conflicts: Vec<(RoadId, Vec<RoadId>)>,
}

#[derive(Serialize)]
struct SignalSummary<'a> {
    id: &'a str,
    name: &'a str,
    road: RoadId,
    s: f64,
    t: f64,
    #[serde(rename = "type")]
    kind: &'a str,
    dynamic: bool,
    transform: Transform,
}

#[derive(Serialize)]
struct ReferenceSummary<'a> {
    road: RoadId,
    signal: &'a str,
    s: f64,
    resolved: bool,
    validities: &'a [LaneValidity],
}

impl<'a> Summary<'a> {
    fn new(map: &'a Map) -> Self {
        let roads = map
            .roads()
            .map(|road| RoadSummary {
                id: road.id(),
                name: road.name(),
                length: road.length(),
                junction: road.junction_id(),
                nexts: road.nexts(),
                prevs: road.prevs(),
                sections: road
                    .sections()
                    .iter()
                    .map(|section| SectionSummary {
                        s: section.s(),
                        lanes: section
                            .lanes()
                            .map(|lane| LaneSummary {
                                id: lane.id(),
                                lane_type: lane.lane_type().name(),
                                width: lane.width(section.s()),
                                next: lane.next_lanes(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let junctions = map
            .junctions()
            .map(|junction| JunctionSummary {
                id: junction.id(),
                name: junction.name(),
                bounding_box: junction.bounding_box(),
                conflicts: junction
                    .conflicts()
                    .iter()
                    .map(|(road, others)| (*road, others.iter().copied().collect()))
                    .collect(),
            })
            .collect();

        let signals = map
            .signals()
            .map(|signal| SignalSummary {
                id: signal.id(),
                name: signal.name(),
                road: signal.road(),
                s: signal.s(),
                t: signal.t(),
                kind: signal.kind(),
                dynamic: signal.dynamic(),
                transform: signal.transform(),
            })
            .collect();

        let references = map
            .signal_references()
            .iter()
            .map(|reference| ReferenceSummary {
                road: reference.road(),
                signal: reference.signal_id(),
                s: reference.s(),
                resolved: reference.is_resolved(),
                validities: reference.validities(),
            })
            .collect();

        Self {
            geo_reference: map.geo_reference(),
            roads,
            junctions,
            signals,
            references,
        }
    }
}
