use indexmap::IndexSet;
use odrive_core::Transform;
use serde::Serialize;

use crate::ids::{ContId, JuncId, LaneId, RoadId, SignId};

/// Direction of travel a signal applies to, relative to the road's `s` axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Positive,
    Negative,
    #[default]
    Both,
}

impl Orientation {
    pub fn from_attribute(value: &str) -> Self {
        match value {
            "+" => Self::Positive,
            "-" => Self::Negative,
            _ => Self::Both,
        }
    }
}

/// Inclusive lane-id interval a signal reference applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaneValidity {
    pub from_lane: LaneId,
    pub to_lane: LaneId,
}

impl LaneValidity {
    pub const fn new(from_lane: LaneId, to_lane: LaneId) -> Self {
        Self { from_lane, to_lane }
    }

    /// `[0, 0]` covers only the center lane, which has no traffic.
    pub fn is_center_only(&self) -> bool {
        self.from_lane == 0 && self.to_lane == 0
    }

    pub fn contains(&self, lane: LaneId) -> bool {
        let (lo, hi) = if self.from_lane <= self.to_lane {
            (self.from_lane, self.to_lane)
        } else {
            (self.to_lane, self.from_lane)
        };
        (lo..=hi).contains(&lane)
    }
}

/// Edge to another signal, e.g. a light that drives an arrow sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub id: SignId,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub(crate) id: SignId,
    pub(crate) road: RoadId,
    pub(crate) s: f64,
    pub(crate) t: f64,
    pub(crate) name: String,
    pub(crate) dynamic: bool,
    pub(crate) orientation: Orientation,
    pub(crate) z_offset: f64,
    pub(crate) country: String,
    pub(crate) kind: String,
    pub(crate) subtype: String,
    pub(crate) value: f64,
    pub(crate) unit: String,
    pub(crate) height: f64,
    pub(crate) width: f64,
    pub(crate) text: String,
    pub(crate) h_offset: f64,
    pub(crate) pitch: f64,
    pub(crate) roll: f64,
    pub(crate) inertial: bool,
    pub(crate) transform: Transform,
    pub(crate) dependencies: Vec<Dependency>,
    pub(crate) controllers: IndexSet<ContId>,
}

/// Signal `type` codes that are traffic lights.
const TRAFFIC_LIGHT_TYPES: &[&str] = &[
    "1000001", "1000002", "1000007", "1000008", "1000009", "1000010", "1000011", "1000012",
    "1000013", "1000014", "1000015", "1000016", "1000017", "1000018", "1000019", "1000020", "F",
    "W", "A",
];

impl Signal {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn road(&self) -> RoadId {
        self.road
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn z_offset(&self) -> f64 {
        self.z_offset
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// The `type` attribute.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn h_offset(&self) -> f64 {
        self.h_offset
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn roll(&self) -> f64 {
        self.roll
    }

    /// Whether the pose came from `<positionInertial>` instead of `s`/`t`.
    pub fn uses_inertial_position(&self) -> bool {
        self.inertial
    }

    /// World pose.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn controllers(&self) -> &IndexSet<ContId> {
        &self.controllers
    }

    pub fn is_traffic_light(&self) -> bool {
        TRAFFIC_LIGHT_TYPES.contains(&self.kind.as_str())
    }
}

/// Placement of a signal's effect on a road, either the signal's own
/// position or a `<signalReference>` elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalReference {
    pub(crate) road: RoadId,
    pub(crate) signal_id: SignId,
    pub(crate) s: f64,
    pub(crate) t: f64,
    pub(crate) orientation: Orientation,
    pub(crate) validities: Vec<LaneValidity>,
    /// Index into the map's signals, once resolved.
    #[serde(skip)]
    pub(crate) signal: Option<usize>,
}

impl SignalReference {
    pub fn road(&self) -> RoadId {
        self.road
    }

    pub fn signal_id(&self) -> &str {
        &self.signal_id
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn validities(&self) -> &[LaneValidity] {
        &self.validities
    }

    pub fn is_resolved(&self) -> bool {
        self.signal.is_some()
    }

    /// Whether the reference applies to `lane`.
    pub fn applies_to(&self, lane: LaneId) -> bool {
        self.validities.iter().any(|v| v.contains(lane))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controller {
    pub(crate) id: ContId,
    pub(crate) name: String,
    pub(crate) sequence: u32,
    pub(crate) signals: IndexSet<SignId>,
    pub(crate) junctions: IndexSet<JuncId>,
}

impl Controller {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn signals(&self) -> &IndexSet<SignId> {
        &self.signals
    }

    pub fn junctions(&self) -> &IndexSet<JuncId> {
        &self.junctions
    }
}

/// Timing of a group of traffic lights switching together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficGroup {
    pub id: String,
    pub red_time: f64,
    pub yellow_time: f64,
    pub green_time: f64,
    pub lights: Vec<SignId>,
}

impl TrafficGroup {
    pub fn cycle_time(&self) -> f64 {
        self.red_time + self.yellow_time + self.green_time
    }
}
