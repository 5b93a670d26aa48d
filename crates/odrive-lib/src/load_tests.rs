use indoc::indoc;

use crate::diagnostics::DiagnosticKind;
use crate::map::{LaneType, Map, QueryError};
use crate::test_utils::{document, dump, line_road};
use crate::{Error, LoadConfig, Loader, load};

const SINGLE_LANE: &str = indoc! {r#"
    <OpenDRIVE>
      <road id="1" length="100" junction="-1">
        <planView>
          <geometry s="0" x="0" y="0" hdg="0" length="100"><line/></geometry>
        </planView>
        <lanes>
          <laneSection s="0">
            <right>
              <lane id="-1" type="driving">
                <width sOffset="0" a="3.5" b="0" c="0" d="0"/>
              </lane>
            </right>
          </laneSection>
        </lanes>
      </road>
    </OpenDRIVE>
"#};

#[test]
fn single_lane_road() {
    let map = load(SINGLE_LANE).unwrap();

    assert_eq!(map.road(1).unwrap().length(), 100.0);
    let lane = map.lane(1, -1, 50.0).unwrap();
    assert_eq!(lane.lane_type(), LaneType::DRIVING);
    assert_eq!(lane.width(50.0), 3.5);
    assert_eq!(map.lane_width(1, -1, 50.0), Ok(3.5));
}

#[test]
fn most_recent_width_wins() {
    let xml = indoc! {r#"
        <OpenDRIVE>
          <road id="1" length="100" junction="-1">
            <planView>
              <geometry s="0" x="0" y="0" hdg="0" length="100"><line/></geometry>
            </planView>
            <lanes>
              <laneSection s="0">
                <right>
                  <lane id="-1" type="driving">
                    <width sOffset="0" a="3" b="0" c="0" d="0"/>
                    <width sOffset="10" a="4" b="0" c="0" d="0"/>
                  </lane>
                </right>
              </laneSection>
            </lanes>
          </road>
        </OpenDRIVE>
    "#};
    let map = Map::expect_valid(xml);

    assert_eq!(map.lane_width(1, -1, 5.0), Ok(3.0));
    assert_eq!(map.lane_width(1, -1, 15.0), Ok(4.0));
}

#[test]
fn malformed_xml_is_fatal() {
    let result = Loader::new("<OpenDRIVE><road>").load();
    assert!(matches!(result, Err(Error::Xml(_))));
    assert!(load("<OpenDRIVE><road>").is_none());
}

#[test]
fn wrong_root_is_fatal() {
    let result = Loader::new("<Network/>").load();
    let Err(err) = result else {
        panic!("expected an error");
    };
    insta::assert_snapshot!(err.to_string(), @"root element is `Network`, expected `OpenDRIVE`");
}

#[test]
fn lane_queries_outside_the_road() {
    let map = load(SINGLE_LANE).unwrap();

    assert_eq!(
        map.lane(1, -1, 100.0).unwrap_err(),
        QueryError::OutOfRange {
            road: 1,
            s: 100.0,
            length: 100.0
        }
    );
    assert!(map.lane(1, -1, -0.5).is_err());
    assert_eq!(
        map.lane(1, -2, 10.0).unwrap_err(),
        QueryError::LaneNotFound {
            road: 1,
            lane: -2,
            s: 10.0
        }
    );
    assert_eq!(map.road(7).unwrap_err(), QueryError::RoadNotFound(7));
}

#[test]
fn missing_geo_reference_uses_default() {
    let (map, diagnostics) = Map::expect(SINGLE_LANE);

    assert_eq!(map.geo_reference().latitude, 42.0);
    assert_eq!(map.geo_reference().longitude, 2.0);
    assert_eq!(diagnostics.count(DiagnosticKind::MissingGeoReference), 1);
}

#[test]
fn geo_reference_from_header() {
    let xml = document(&line_road(1, -1, (0.0, 0.0, 0.0), 50.0, "", ""));
    let (map, diagnostics) = Map::expect(&xml);

    assert_eq!(map.geo_reference().latitude, 48.5);
    assert_eq!(map.geo_reference().longitude, 9.25);
    assert!(diagnostics.is_empty(), "{}", dump(&diagnostics));
}

#[test]
fn lane_transform_faces_lane_direction() {
    let xml = document(&line_road(1, -1, (0.0, 0.0, 0.0), 50.0, "", ""));
    let map = Map::expect_valid(&xml);

    let right = map.lane_transform(1, -1, 10.0).unwrap();
    assert_eq!(right.location.x, 10.0);
    assert_eq!(right.location.y, -1.75);
    assert_eq!(right.rotation.yaw, 0.0);

    let left = map.lane_transform(1, 1, 10.0).unwrap();
    assert_eq!(left.location.y, 1.75);
    assert_eq!(left.rotation.yaw, std::f64::consts::PI);
}

#[test]
fn lane_transform_needs_geometry() {
    let xml = indoc! {r#"
        <OpenDRIVE>
          <road id="4" length="10" junction="-1">
            <lanes>
              <laneSection s="0">
                <right><lane id="-1" type="driving"><width sOffset="0" a="3" b="0" c="0" d="0"/></lane></right>
              </laneSection>
            </lanes>
          </road>
        </OpenDRIVE>
    "#};
    let map = Map::expect_valid(xml);

    assert_eq!(
        map.lane_transform(4, -1, 5.0).unwrap_err(),
        QueryError::NoGeometry(4)
    );
}

#[test]
fn config_setters() {
    let config = LoadConfig::default()
        .with_conflict_tolerance(0.5)
        .with_conflict_sample_step(0.25)
        .with_bounding_box_intervals(4)
        .with_signal_overlap_ratio(0.5);

    assert_eq!(config.conflict_tolerance, 0.5);
    assert_eq!(config.conflict_sample_step, 0.25);
    assert_eq!(config.bounding_box_intervals, 4);
    assert_eq!(config.signal_overlap_ratio, 0.5);
    assert_eq!(LoadConfig::default().conflict_tolerance, 2.0);
}

#[test]
fn map_serializes() {
    let xml = document(&line_road(1, -1, (0.0, 0.0, 0.0), 50.0, "", ""));
    let map = Map::expect_valid(&xml);

    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json["roads"]["1"]["length"], 50.0);
    assert_eq!(json["roads"]["1"]["sections"][0]["lanes"]["-1"]["lane_type"], "driving");
}
