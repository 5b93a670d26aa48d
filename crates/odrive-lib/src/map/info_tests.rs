use odrive_core::CubicPolynomial;

use super::info::*;
use super::lane::LaneType;

fn width(s: f64, a: f64) -> LaneInfo {
    LaneWidth(CubicPolynomial::with_offset(a, 0.0, 0.0, 0.0, s)).into()
}

fn rule(s: f64, value: &str) -> LaneInfo {
    Rule {
        s,
        value: value.to_string(),
    }
    .into()
}

#[test]
fn records_are_sorted_by_s() {
    let set = InfoSet::new(vec![width(20.0, 2.0), rule(5.0, "no stopping"), width(0.0, 1.0)]);

    let starts = set.iter().map(Record::s).collect::<Vec<_>>();
    assert_eq!(starts, vec![0.0, 5.0, 20.0]);
    assert_eq!(set.len(), 3);
}

#[test]
fn get_returns_last_record_of_kind_at_or_before_s() {
    let set = InfoSet::new(vec![width(0.0, 1.0), rule(5.0, "a"), width(10.0, 2.0)]);

    assert_eq!(set.get::<LaneWidth>(9.9).map(|w| w.evaluate(9.9)), Some(1.0));
    assert_eq!(set.get::<LaneWidth>(10.0).map(|w| w.evaluate(10.0)), Some(2.0));
    assert_eq!(set.get::<Rule>(4.0), None);
    assert_eq!(set.get::<Rule>(50.0).map(|r| r.value.as_str()), Some("a"));
    assert!(set.get::<Material>(50.0).is_none());
}

#[test]
fn push_keeps_insertion_order_for_equal_s() {
    let mut set = InfoSet::default();
    set.push(rule(5.0, "first"));
    set.push(width(0.0, 1.0));
    set.push(rule(5.0, "second"));

    let values = set.all::<Rule>().map(|r| r.value.as_str()).collect::<Vec<_>>();
    assert_eq!(values, vec!["first", "second"]);
    assert_eq!(set.get::<Rule>(5.0).unwrap().value, "second");
    assert_eq!(set.iter().next().map(Record::s), Some(0.0));
}

#[test]
fn polynomial_records_use_absolute_s() {
    let offset = LaneOffset(CubicPolynomial::with_offset(1.0, 0.5, 0.0, 0.0, 10.0));
    assert_eq!(offset.evaluate(10.0), 1.0);
    assert_eq!(offset.evaluate(14.0), 3.0);
    assert_eq!(offset.tangent(14.0), 0.5);
    assert_eq!(RoadInfo::from(offset).s(), 10.0);
}

#[test]
fn lane_type_names() {
    assert_eq!(LaneType::from_name("driving"), LaneType::DRIVING);
    assert_eq!(LaneType::from_name("Sidewalk"), LaneType::SIDEWALK);
    assert_eq!(LaneType::from_name("onRamp"), LaneType::ON_RAMP);
    assert_eq!(LaneType::from_name("hovercraft"), LaneType::NONE);

    assert_eq!(LaneType::ROAD_WORKS.name(), "roadworks");
    assert_eq!(LaneType::ANY.name(), "any");
    assert_eq!((LaneType::DRIVING | LaneType::BIKING).name(), "mixed");
    assert_eq!(LaneType::default(), LaneType::NONE);
}

#[test]
fn lane_type_masks() {
    let mask = LaneType::DRIVING | LaneType::SHOULDER;

    assert!(mask.contains(LaneType::DRIVING));
    assert!(mask.contains(LaneType::SHOULDER));
    assert!(!mask.contains(LaneType::SIDEWALK));
    assert!(LaneType::ANY.contains(LaneType::TRAM));
    assert!(!LaneType::ANY.contains(LaneType::NONE));
}

#[test]
fn attribute_enums_fall_back() {
    assert_eq!(LaneChange::from_attribute("increase"), LaneChange::Increase);
    assert_eq!(LaneChange::from_attribute("none"), LaneChange::None);
    assert_eq!(LaneChange::from_attribute(""), LaneChange::Both);

    assert_eq!(CrossfallSide::from_attribute("left"), CrossfallSide::Left);
    assert_eq!(CrossfallSide::from_attribute("right"), CrossfallSide::Right);
    assert_eq!(CrossfallSide::from_attribute("sideways"), CrossfallSide::Both);
}
