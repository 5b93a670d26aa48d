//! Attribute records attached to roads and lanes.
//!
//! Each road and lane keeps one [`InfoSet`]: a single `s`-ordered list of a
//! closed variant type. Lookups ask for one record kind and get the last
//! record of that kind starting at or before the query `s`.

use odrive_core::CubicPolynomial;
use serde::Serialize;

/// Anything stored in an [`InfoSet`] starts at some road coordinate.
pub trait Record {
    fn s(&self) -> f64;
}

/// One concrete record kind inside the variant type `I`.
pub trait InfoKind<I>: Sized {
    fn project(info: &I) -> Option<&Self>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InfoSet<I> {
    records: Vec<I>,
}

impl<I> Default for InfoSet<I> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<I: Record> InfoSet<I> {
    /// Sorts by `s`. Records sharing an `s` keep their insertion order.
    pub fn new(mut records: Vec<I>) -> Self {
        records.sort_by(|a, b| a.s().total_cmp(&b.s()));
        Self { records }
    }

    pub fn push(&mut self, record: I) {
        let at = self.records.partition_point(|r| r.s() <= record.s());
        self.records.insert(at, record);
    }

    /// Last record of kind `K` with `record.s <= s`.
    pub fn get<K: InfoKind<I>>(&self, s: f64) -> Option<&K> {
        self.records
            .iter()
            .take_while(|r| r.s() <= s)
            .filter_map(K::project)
            .last()
    }

    /// Every record of kind `K`, in `s` order.
    pub fn all<'a, K: InfoKind<I> + 'a>(&'a self) -> impl Iterator<Item = &'a K> {
        self.records.iter().filter_map(K::project)
    }

    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

macro_rules! info_kind {
    ($info:ident :: $variant:ident => $ty:ty) => {
        impl InfoKind<$info> for $ty {
            fn project(info: &$info) -> Option<&Self> {
                match info {
                    $info::$variant(record) => Some(record),
                    _ => None,
                }
            }
        }

        impl From<$ty> for $info {
            fn from(record: $ty) -> Self {
                $info::$variant(record)
            }
        }
    };
}

// ============================================================================
// Polynomial records
// ============================================================================

macro_rules! poly_record {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub CubicPolynomial);

        impl $name {
            pub fn evaluate(&self, s: f64) -> f64 {
                self.0.evaluate(s)
            }

            pub fn tangent(&self, s: f64) -> f64 {
                self.0.tangent(s)
            }
        }

        impl Record for $name {
            fn s(&self) -> f64 {
                self.0.s
            }
        }
    };
}

poly_record!(
    /// Lane width as a function of absolute `s`.
    LaneWidth
);
poly_record!(
    /// Outer lane border, measured from the reference line.
    LaneBorder
);
poly_record!(
    /// Lateral shift of the center lane away from the reference line.
    LaneOffset
);
poly_record!(Elevation);

// ============================================================================
// Road records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadSpeed {
    pub s: f64,
    pub road_type: String,
    pub max: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CrossfallSide {
    Left,
    Right,
    Both,
}

impl CrossfallSide {
    pub fn from_attribute(value: &str) -> Self {
        match value {
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LateralKind {
    Superelevation,
    Crossfall { side: CrossfallSide },
    Shape { t: f64 },
}

/// One `<lateralProfile>` child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lateral {
    pub kind: LateralKind,
    pub poly: CubicPolynomial,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record", content = "data", rename_all = "camelCase")]
pub enum RoadInfo {
    Speed(RoadSpeed),
    LaneOffset(LaneOffset),
    Elevation(Elevation),
    Lateral(Lateral),
}

impl Record for RoadInfo {
    fn s(&self) -> f64 {
        match self {
            RoadInfo::Speed(r) => r.s,
            RoadInfo::LaneOffset(r) => r.s(),
            RoadInfo::Elevation(r) => r.s(),
            RoadInfo::Lateral(r) => r.poly.s,
        }
    }
}

info_kind!(RoadInfo::Speed => RoadSpeed);
info_kind!(RoadInfo::LaneOffset => LaneOffset);
info_kind!(RoadInfo::Elevation => Elevation);
info_kind!(RoadInfo::Lateral => Lateral);

// ============================================================================
// Lane records
// ============================================================================

/// Which lane changes a road mark permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LaneChange {
    Increase,
    Decrease,
    None,
    #[default]
    Both,
}

impl LaneChange {
    pub fn from_attribute(value: &str) -> Self {
        match value {
            "increase" => Self::Increase,
            "decrease" => Self::Decrease,
            "none" => Self::None,
            _ => Self::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadMarkLine {
    pub s: f64,
    pub length: f64,
    pub space: f64,
    pub t_offset: f64,
    pub rule: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadMark {
    pub s: f64,
    /// Position among the lane's `<roadMark>` elements.
    pub index: u32,
    pub kind: String,
    pub weight: String,
    pub color: String,
    pub material: String,
    pub width: f64,
    pub lane_change: LaneChange,
    pub height: f64,
    pub type_name: String,
    pub type_width: f64,
    pub lines: Vec<RoadMarkLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub s: f64,
    pub surface: String,
    pub friction: f64,
    pub roughness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Visibility {
    pub s: f64,
    pub forward: f64,
    pub back: f64,
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedLimit {
    pub s: f64,
    pub max: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Access {
    pub s: f64,
    pub restriction: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Height {
    pub s: f64,
    pub inner: f64,
    pub outer: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub s: f64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record", content = "data", rename_all = "camelCase")]
pub enum LaneInfo {
    Width(LaneWidth),
    Border(LaneBorder),
    Mark(RoadMark),
    Material(Material),
    Visibility(Visibility),
    Speed(SpeedLimit),
    Access(Access),
    Height(Height),
    Rule(Rule),
}

impl Record for LaneInfo {
    fn s(&self) -> f64 {
        match self {
            LaneInfo::Width(r) => r.s(),
            LaneInfo::Border(r) => r.s(),
            LaneInfo::Mark(r) => r.s,
            LaneInfo::Material(r) => r.s,
            LaneInfo::Visibility(r) => r.s,
            LaneInfo::Speed(r) => r.s,
            LaneInfo::Access(r) => r.s,
            LaneInfo::Height(r) => r.s,
            LaneInfo::Rule(r) => r.s,
        }
    }
}

info_kind!(LaneInfo::Width => LaneWidth);
info_kind!(LaneInfo::Border => LaneBorder);
info_kind!(LaneInfo::Mark => RoadMark);
info_kind!(LaneInfo::Material => Material);
info_kind!(LaneInfo::Visibility => Visibility);
info_kind!(LaneInfo::Speed => SpeedLimit);
info_kind!(LaneInfo::Access => Access);
info_kind!(LaneInfo::Height => Height);
info_kind!(LaneInfo::Rule => Rule);
