use indoc::indoc;

use crate::diagnostics::DiagnosticKind;
use crate::map::{
    Access, CrossfallSide, Elevation, LaneChange, LaneOffset, LaneType, Lateral, LateralKind,
    LinkElement, Map, Material, Orientation, RoadMark, RoadSpeed, SpeedLimit,
};
use crate::test_utils::{document, dump, line_road, messages};

#[test]
fn invalid_road_id_skips_the_road() {
    let xml = document(indoc! {r#"
        <road id="north" length="10" junction="-1"/>
        <road id="2" length="10" junction="-1"/>
    "#});
    let (map, diagnostics) = Map::expect(&xml);

    assert_eq!(map.roads().count(), 1);
    assert!(map.road(2).is_ok());
    insta::assert_snapshot!(dump(&diagnostics), @r#"error: invalid attribute value: id="north""#);
}

#[test]
fn duplicate_road_keeps_the_first() {
    let xml = document(indoc! {r#"
        <road id="3" name="first" length="10" junction="-1"/>
        <road id="3" name="second" length="20" junction="-1"/>
    "#});
    let (map, diagnostics) = Map::expect(&xml);

    assert_eq!(map.road(3).unwrap().name(), "first");
    assert_eq!(diagnostics.error_count(), 1);
    insta::assert_snapshot!(
        messages(&diagnostics, DiagnosticKind::InvalidAttribute).join("\n"),
        @r#"invalid attribute value: id="3" is used twice"#
    );
}

#[test]
fn malformed_number_defaults_to_zero() {
    let xml = document(r#"<road id="1" length="long" junction="-1"/>"#);
    let (map, diagnostics) = Map::expect(&xml);

    assert_eq!(map.road(1).unwrap().length(), 0.0);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(dump(&diagnostics), @r#"error: invalid attribute value: length="long""#);
}

#[test]
fn road_attributes_and_links() {
    let xml = document(indoc! {r#"
        <road id="5" name="Main" length="40" junction="-1">
          <link>
            <predecessor elementType="junction" elementId="9"/>
            <successor elementType="road" elementId="6" contactPoint="start"/>
          </link>
          <type s="0" type="town"><speed max="50" unit="km/h"/></type>
          <type s="20" type="rural"><speed max="no limit"/></type>
        </road>
    "#});
    let map = Map::expect_valid(&xml);
    let road = map.road(5).unwrap();

    assert_eq!(road.name(), "Main");
    assert_eq!(road.junction_id(), -1);
    assert!(!road.is_junction());
    assert_eq!(road.predecessor(), 9);
    assert_eq!(road.successor(), 6);
    assert_eq!(
        road.predecessor_link().unwrap().element,
        LinkElement::Junction
    );

    let speed = road.speed_at(10.0).unwrap();
    assert_eq!(speed.road_type, "town");
    assert_eq!(speed.max, 50.0);
    assert_eq!(speed.unit, "km/h");
    let speeds: Vec<&RoadSpeed> = road.infos::<RoadSpeed>().collect();
    assert_eq!(speeds.len(), 2);
    assert_eq!(speeds[1].max, 0.0);
}

#[test]
fn missing_profiles_are_synthesized() {
    let xml = document(r#"<road id="1" length="10" junction="-1"/>"#);
    let map = Map::expect_valid(&xml);
    let road = map.road(1).unwrap();

    assert_eq!(road.infos::<LaneOffset>().count(), 1);
    assert_eq!(road.infos::<Elevation>().count(), 1);
    assert_eq!(road.elevation_at(5.0), 0.0);
    assert_eq!(road.lane_offset_at(5.0), 0.0);
}

#[test]
fn profiles() {
    let xml = document(indoc! {r#"
        <road id="1" length="100" junction="-1">
          <elevationProfile>
            <elevation s="0" a="1" b="0.1" c="0" d="0"/>
            <elevation s="50" a="6" b="0" c="0" d="0"/>
          </elevationProfile>
          <lateralProfile>
            <superelevation s="0" a="0.02" b="0" c="0" d="0"/>
            <crossfall side="left" s="10" a="0.1" b="0" c="0" d="0"/>
            <shape s="20" t="-1.5" a="0" b="0" c="0" d="0"/>
          </lateralProfile>
        </road>
    "#});
    let map = Map::expect_valid(&xml);
    let road = map.road(1).unwrap();

    assert_eq!(road.elevation_at(10.0), 2.0);
    assert_eq!(road.elevation_at(70.0), 6.0);

    let kinds: Vec<LateralKind> = road.infos::<Lateral>().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LateralKind::Superelevation,
            LateralKind::Crossfall {
                side: CrossfallSide::Left
            },
            LateralKind::Shape { t: -1.5 },
        ]
    );
}

#[test]
fn geometry_kinds() {
    let xml = document(indoc! {r#"
        <road id="1" length="50" junction="-1">
          <planView>
            <geometry s="0" x="0" y="0" hdg="0" length="10"><line/></geometry>
            <geometry s="10" x="10" y="0" hdg="0" length="10"><spiral curvStart="0" curvEnd="0.01"/></geometry>
            <geometry s="20" x="20" y="0" hdg="0" length="10"><arc curvature="0.01"/></geometry>
            <geometry s="30" x="30" y="0" hdg="0" length="10"><poly3 a="0" b="0" c="0" d="0"/></geometry>
            <geometry s="40" x="40" y="0" hdg="0" length="10">
              <paramPoly3 aU="0" bU="10" cU="0" dU="0" aV="0" bV="0" cV="0" dV="0" pRange="normalized"/>
            </geometry>
          </planView>
        </road>
    "#});
    let map = Map::expect_valid(&xml);
    let road = map.road(1).unwrap();

    let names: Vec<&str> = road.geometries().iter().map(|g| g.curve().name()).collect();
    insta::assert_snapshot!(names.join(" "), @"line spiral arc poly3 paramPoly3");
    assert_eq!(road.geometry_at(25.0).unwrap().s(), 20.0);
}

#[test]
fn geometry_segments_are_contiguous() {
    let xml = document(indoc! {r#"
        <road id="1" length="30" junction="-1">
          <planView>
            <geometry s="0" x="0" y="0" hdg="0" length="10"><line/></geometry>
            <geometry s="10" x="10" y="0" hdg="0" length="20"><arc curvature="0.02"/></geometry>
          </planView>
        </road>
    "#});
    let map = Map::expect_valid(&xml);
    let road = map.road(1).unwrap();

    let geometries = road.geometries();
    assert_eq!(geometries[0].s(), 0.0);
    for pair in geometries.windows(2) {
        assert!((pair[0].end() - pair[1].s()).abs() < 1e-9);
    }
    assert!((geometries[1].end() - road.length()).abs() < 1e-9);
}

#[test]
fn bad_geometry_is_skipped() {
    let xml = document(indoc! {r#"
        <road id="1" length="20" junction="-1">
          <planView>
            <geometry s="0" x="0" y="0" hdg="0" length="0"><line/></geometry>
            <geometry s="0" x="0" y="0" hdg="0" length="10"><clothoid/></geometry>
            <geometry s="0" x="0" y="0" hdg="0" length="20"><line/></geometry>
          </planView>
        </road>
    "#});
    let (map, diagnostics) = Map::expect(&xml);

    assert_eq!(map.road(1).unwrap().geometries().len(), 1);
    insta::assert_snapshot!(dump(&diagnostics), @r"
    warning: geometry segment has no length: length 0 at s=0
    warning: unknown geometry kind `clothoid`
    ");
}

#[test]
fn non_finite_geometry_length_is_skipped() {
    let xml = document(indoc! {r#"
        <road id="1" length="30" junction="-1">
          <planView>
            <geometry s="0" x="0" y="0" hdg="0" length="inf"><poly3 a="0" b="0" c="0" d="0"/></geometry>
            <geometry s="0" x="0" y="0" hdg="0" length="NaN">
              <paramPoly3 aU="0" bU="1" cU="0" dU="0" aV="0" bV="0" cV="0" dV="0" pRange="arcLength"/>
            </geometry>
            <geometry s="0" x="0" y="0" hdg="0" length="30"><line/></geometry>
          </planView>
        </road>
    "#});
    let (map, diagnostics) = Map::expect(&xml);

    assert_eq!(map.road(1).unwrap().geometries().len(), 1);
    assert_eq!(diagnostics.count(DiagnosticKind::InvalidGeometry), 2);
    insta::assert_snapshot!(
        messages(&diagnostics, DiagnosticKind::InvalidAttribute).join("\n"),
        @r#"
    invalid attribute value: length="inf"
    invalid attribute value: length="NaN"
    "#
    );
}

#[test]
fn non_finite_road_length_reads_as_zero() {
    let xml = document(r#"<road id="1" length="infinity" junction="-1"/>"#);
    let (map, diagnostics) = Map::expect(&xml);

    assert_eq!(map.road(1).unwrap().length(), 0.0);
    insta::assert_snapshot!(dump(&diagnostics), @r#"error: invalid attribute value: length="infinity""#);
}

#[test]
fn lane_sections_and_lanes() {
    let xml = document(indoc! {r#"
        <road id="1" length="100" junction="-1">
          <lanes>
            <laneSection s="0">
              <left><lane id="1" type="sidewalk" level="true"><width sOffset="0" a="2" b="0" c="0" d="0"/></lane></left>
              <center><lane id="0" type="none"/></center>
              <right>
                <lane id="-1" type="Driving">
                  <link><successor id="-1"/></link>
                  <width sOffset="0" a="3" b="0" c="0" d="0"/>
                </lane>
                <lane id="-2" type="bogus"><width sOffset="0" a="1" b="0" c="0" d="0"/></lane>
              </right>
            </laneSection>
            <laneSection s="60">
              <right><lane id="-1" type="shoulder"><width sOffset="0" a="3" b="0" c="0" d="0"/></lane></right>
            </laneSection>
          </lanes>
        </road>
    "#});
    let map = Map::expect_valid(&xml);
    let road = map.road(1).unwrap();

    assert_eq!(road.sections().len(), 2);
    assert_eq!(road.sections()[1].s(), 60.0);

    let sidewalk = map.lane(1, 1, 10.0).unwrap();
    assert_eq!(sidewalk.lane_type(), LaneType::SIDEWALK);
    assert!(sidewalk.level());

    let driving = map.lane(1, -1, 10.0).unwrap();
    assert_eq!(driving.lane_type(), LaneType::DRIVING);
    assert_eq!(driving.successor(), -1);
    assert_eq!(map.lane(1, -2, 10.0).unwrap().lane_type(), LaneType::NONE);

    let later = map.lane(1, -1, 70.0).unwrap();
    assert_eq!(later.section(), 1);
    assert_eq!(later.lane_type(), LaneType::SHOULDER);
}

#[test]
fn lane_records_are_anchored_at_the_section() {
    let xml = document(indoc! {r#"
        <road id="1" length="100" junction="-1">
          <lanes>
            <laneSection s="40">
              <right>
                <lane id="-1" type="driving">
                  <width sOffset="0" a="3" b="0.1" c="0" d="0"/>
                  <roadMark sOffset="0" type="solid" weight="standard" color="white" width="0.15" laneChange="none"/>
                  <roadMark sOffset="10" type="broken" color="yellow" laneChange="increase">
                    <type name="dashed" width="0.12">
                      <line length="3" space="6" tOffset="0" sOffset="1" rule="caution" width="0.12"/>
                    </type>
                  </roadMark>
                  <material sOffset="0" surface="asphalt" friction="0.8" roughness="0.1"/>
                  <speed sOffset="5" max="30" unit="km/h"/>
                  <access sOffset="0" restriction="bus"/>
                </lane>
              </right>
            </laneSection>
          </lanes>
        </road>
    "#});
    let map = Map::expect_valid(&xml);
    let lane = map.lane(1, -1, 60.0).unwrap();

    assert_eq!(lane.width(40.0), 3.0);
    assert!((lane.width(50.0) - 4.0).abs() < 1e-12);

    let marks: Vec<&RoadMark> = lane.infos::<RoadMark>().collect();
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].index, 0);
    assert_eq!(marks[0].lane_change, LaneChange::None);
    assert_eq!(marks[1].index, 1);
    assert_eq!(marks[1].s, 50.0);
    assert_eq!(marks[1].type_name, "dashed");
    assert_eq!(marks[1].lines[0].s, 51.0);
    assert_eq!(marks[1].lines[0].rule, "caution");
    assert_eq!(lane.info::<RoadMark>(45.0).unwrap().kind, "solid");

    assert_eq!(lane.info::<Material>(60.0).unwrap().surface, "asphalt");
    assert!(lane.info::<SpeedLimit>(42.0).is_none());
    assert_eq!(lane.info::<SpeedLimit>(45.0).unwrap().max, 30.0);
    assert_eq!(lane.info::<Access>(41.0).unwrap().restriction, "bus");
}

#[test]
fn missing_width_is_zero() {
    let xml = document(indoc! {r#"
        <road id="8" length="10" junction="-1">
          <lanes>
            <laneSection s="0">
              <center><lane id="0" type="none"/></center>
              <right><lane id="-1" type="driving"/></right>
            </laneSection>
          </lanes>
        </road>
    "#});
    let (map, diagnostics) = Map::expect(&xml);

    assert_eq!(map.lane_width(8, -1, 5.0), Ok(0.0));
    insta::assert_snapshot!(dump(&diagnostics), @"warning: lane has no width: lane -1 of road 8, using zero");
}

#[test]
fn signals_and_references() {
    let signals = indoc! {r#"
        <signals>
          <signal s="10" t="-4" id="s1" name="Speed" dynamic="no" orientation="+" zOffSet="1.5"
                  country="DE" type="274" subtype="53" value="30" unit="km/h" height="0.6" width="0.6">
            <validity fromLane="-1" toLane="-1"/>
            <dependency id="s2" type="supplementary"/>
          </signal>
          <signal s="12" t="4" id="s2" name="Light" dynamic="yes" orientation="-" zOffset="3" type="1000001">
            <positionInertial x="1" y="2" z="3" hdg="0.5" pitch="0" roll="0"/>
          </signal>
          <signalReference s="30" t="-4" id="s1" orientation="+">
            <validity fromLane="-1" toLane="-1"/>
          </signalReference>
        </signals>
    "#};
    let xml = document(&line_road(1, -1, (0.0, 0.0, 0.0), 50.0, "", signals));
    let map = Map::expect_valid(&xml);

    let speed = map.signal("s1").unwrap();
    assert_eq!(speed.z_offset(), 1.5);
    assert_eq!(speed.kind(), "274");
    assert_eq!(speed.value(), 30.0);
    assert!(!speed.dynamic());
    assert_eq!(speed.orientation(), Orientation::Positive);
    assert_eq!(speed.dependencies()[0].id, "s2");

    let light = map.signal("s2").unwrap();
    assert!(light.dynamic());
    assert!(light.is_traffic_light());
    assert!(light.uses_inertial_position());
    assert_eq!(light.transform().location.y, 2.0);

    let references: Vec<_> = map.signal_references_on(1).collect();
    assert_eq!(references.len(), 3);
    assert_eq!(references[2].s(), 30.0);
    assert!(references[2].applies_to(-1));
    assert!(!references[2].applies_to(1));
}

#[test]
fn controllers_junctions_and_traffic_groups() {
    let xml = document(indoc! {r#"
        <junction id="100" name="cross">
          <connection id="0" incomingRoad="1" connectingRoad="10" contactPoint="start">
            <laneLink from="-1" to="-1"/>
            <laneLink from="-2" to="-1"/>
          </connection>
          <controller id="c1" type="0"/>
        </junction>
        <controller id="c1" name="main" sequence="2">
          <control signalId="s1" type="0"/>
          <control signalId="s2" type="0"/>
        </controller>
        <trafficgroup id="g1" redTime="30" yellowTime="3" greenTime="27">
          <trafficlight id="s1"/>
        </trafficgroup>
    "#});
    let (map, _) = Map::expect(&xml);

    let junction = map.junction(100).unwrap();
    assert_eq!(junction.name(), "cross");
    let connection = junction.connection(0).unwrap();
    assert_eq!(connection.incoming_road, 1);
    assert_eq!(connection.connecting_road, 10);
    assert_eq!(connection.lane_links.len(), 2);
    assert!(junction.controllers().contains("c1"));

    let controller = map.controller("c1").unwrap();
    assert_eq!(controller.sequence(), 2);
    assert_eq!(controller.signals().len(), 2);
    assert!(controller.junctions().contains(&100));

    let group = &map.traffic_groups()[0];
    assert_eq!(group.cycle_time(), 60.0);
    assert_eq!(group.lights, vec!["s1".to_string()]);
}
