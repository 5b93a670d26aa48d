use indoc::{formatdoc, indoc};

use crate::diagnostics::DiagnosticKind;
use crate::map::{LaneValidity, Map};
use crate::test_utils::{document, line_road, messages};

/// Road 1 from the origin along +x, lanes `2, 1, 0, -1, -2`, each 3 m wide.
fn road_with_signals(signals: &str) -> String {
    document(&formatdoc! {r#"
        <road id="1" length="100" junction="-1">
          <planView><geometry s="0" x="0" y="0" hdg="0" length="100"><line/></geometry></planView>
          <lanes>
            <laneSection s="0">
              <left>
                <lane id="2" type="sidewalk"><width sOffset="0" a="3" b="0" c="0" d="0"/></lane>
                <lane id="1" type="driving"><width sOffset="0" a="3" b="0" c="0" d="0"/></lane>
              </left>
              <center><lane id="0" type="none"/></center>
              <right>
                <lane id="-1" type="driving"><width sOffset="0" a="3" b="0" c="0" d="0"/></lane>
                <lane id="-2" type="sidewalk"><width sOffset="0" a="3" b="0" c="0" d="0"/></lane>
              </right>
            </laneSection>
          </lanes>
          <signals>
            {signals}
          </signals>
        </road>
    "#})
}

#[test]
fn default_validity_covers_driving_lanes_on_the_t_side() {
    let xml = road_with_signals(indoc! {r#"
        <signal s="10" t="-8" id="right" orientation="-" type="206"/>
        <signal s="10" t="8" id="left" orientation="+" type="206"/>
        <signal s="10" t="-7" id="facing_away" orientation="+" type="206"/>
        <signal s="10" t="0" id="center" orientation="none" type="206"/>
    "#});
    let (map, diagnostics) = Map::expect(&xml);

    let validities: Vec<&[LaneValidity]> = map
        .signal_references()
        .iter()
        .map(|r| r.validities())
        .collect();
    assert_eq!(validities[0], &[LaneValidity::new(-1, -1)]);
    assert_eq!(validities[1], &[LaneValidity::new(1, 1)]);
    assert_eq!(validities[2], &[LaneValidity::new(-1, -1)]);
    assert_eq!(
        validities[3],
        &[LaneValidity::new(1, 1), LaneValidity::new(-1, -1)]
    );

    insta::assert_snapshot!(
        messages(&diagnostics, DiagnosticKind::MissingValidity).join("\n"),
        @r"
    signal reference has no validity: using lanes [-1, -1]
    signal reference has no validity: using lanes [1, 1]
    signal reference has no validity: using lanes [-1, -1]
    signal reference has no validity: using lanes [1, 1], [-1, -1]
    "
    );
}

#[test]
fn default_validity_skips_other_lane_types() {
    let xml = document(indoc! {r#"
        <road id="1" length="50" junction="-1">
          <planView><geometry s="0" x="0" y="0" hdg="0" length="50"><line/></geometry></planView>
          <lanes>
            <laneSection s="0">
              <center><lane id="0" type="none"/></center>
              <right>
                <lane id="-1" type="driving"><width sOffset="0" a="3" b="0" c="0" d="0"/></lane>
                <lane id="-2" type="driving"><width sOffset="0" a="3" b="0" c="0" d="0"/></lane>
                <lane id="-3" type="shoulder"><width sOffset="0" a="1" b="0" c="0" d="0"/></lane>
                <lane id="-4" type="driving"><width sOffset="0" a="3" b="0" c="0" d="0"/></lane>
                <lane id="-5" type="sidewalk"><width sOffset="0" a="2" b="0" c="0" d="0"/></lane>
              </right>
            </laneSection>
          </lanes>
          <signals><signal s="5" t="-14" id="s" orientation="-" type="206"/></signals>
        </road>
    "#});
    let (map, _) = Map::expect(&xml);

    let validities = map.signal_references()[0].validities();
    assert_eq!(
        validities,
        &[LaneValidity::new(-4, -4), LaneValidity::new(-2, -1)]
    );
    let covered: usize = validities
        .iter()
        .map(|v| (v.to_lane - v.from_lane + 1) as usize)
        .sum();
    assert_eq!(covered, 3);
}

#[test]
fn default_validity_without_lanes_on_that_side() {
    let xml = document(indoc! {r#"
        <road id="1" length="30" junction="-1">
          <planView><geometry s="0" x="0" y="0" hdg="0" length="30"><line/></geometry></planView>
          <lanes>
            <laneSection s="0">
              <right><lane id="-1" type="driving"><width sOffset="0" a="3" b="0" c="0" d="0"/></lane></right>
            </laneSection>
          </lanes>
          <signals><signal s="5" t="8" id="s" orientation="+" type="206"/></signals>
        </road>
    "#});
    let (map, diagnostics) = Map::expect(&xml);

    assert!(map.signal_references()[0].validities().is_empty());
    insta::assert_snapshot!(
        messages(&diagnostics, DiagnosticKind::MissingValidity).join("\n"),
        @"signal reference has no validity: no driving lanes on that side"
    );
}

#[test]
fn explicit_validity_is_kept() {
    let xml = road_with_signals(indoc! {r#"
        <signal s="10" t="-8" id="s" orientation="-" type="206">
          <validity fromLane="-1" toLane="-1"/>
        </signal>
    "#});
    let (map, diagnostics) = Map::expect(&xml);

    assert_eq!(
        map.signal_references()[0].validities(),
        &[LaneValidity::new(-1, -1)]
    );
    assert_eq!(diagnostics.count(DiagnosticKind::MissingValidity), 0);
}

#[test]
fn center_only_references_are_pruned() {
    let xml = road_with_signals(indoc! {r#"
        <signal s="10" t="-8" id="s" orientation="-" type="206">
          <validity fromLane="-1" toLane="-1"/>
        </signal>
        <signalReference s="40" t="0" id="s" orientation="-">
          <validity fromLane="0" toLane="0"/>
        </signalReference>
        <signalReference s="60" t="0" id="s" orientation="-">
          <validity fromLane="0" toLane="0"/>
          <validity fromLane="-2" toLane="-1"/>
        </signalReference>
    "#});
    let (map, diagnostics) = Map::expect(&xml);

    let positions: Vec<f64> = map.signal_references().iter().map(|r| r.s()).collect();
    assert_eq!(positions, vec![10.0, 60.0]);
    insta::assert_snapshot!(
        messages(&diagnostics, DiagnosticKind::ZeroLaneValidity).join("\n"),
        @"signal reference only applies to the center lane: reference to `s` dropped"
    );
}

#[test]
fn references_resolve_to_signals() {
    let xml = road_with_signals(indoc! {r#"
        <signal s="10" t="-8" id="s" orientation="-" type="206">
          <validity fromLane="-1" toLane="-1"/>
        </signal>
        <signalReference s="40" t="-8" id="s" orientation="-">
          <validity fromLane="-1" toLane="-1"/>
        </signalReference>
        <signalReference s="50" t="-8" id="ghost" orientation="-">
          <validity fromLane="-1" toLane="-1"/>
        </signalReference>
    "#});
    let (map, diagnostics) = Map::expect(&xml);

    let references = map.signal_references();
    assert!(references[1].is_resolved());
    assert_eq!(map.referenced_signal(&references[1]).unwrap().id(), "s");
    assert!(!references[2].is_resolved());
    assert!(map.referenced_signal(&references[2]).is_none());
    insta::assert_snapshot!(
        messages(&diagnostics, DiagnosticKind::UnresolvedSignal).join("\n"),
        @"signal `ghost` is not defined"
    );
}

#[test]
fn reference_s_stays_on_the_road() {
    let xml = road_with_signals(indoc! {r#"
        <signalReference s="250" t="-8" id="s" orientation="-">
          <validity fromLane="-1" toLane="-1"/>
        </signalReference>
        <signalReference s="-3" t="-8" id="s" orientation="-">
          <validity fromLane="-1" toLane="-1"/>
        </signalReference>
    "#});
    let (map, _) = Map::expect(&xml);

    let references = map.signal_references();
    assert_eq!(references[0].s(), 100.0 - 1e-5);
    assert_eq!(references[1].s(), 0.0);
}

#[test]
fn signal_transform_from_road_position() {
    let xml = road_with_signals(indoc! {r#"
        <signal s="20" t="-8" id="sign" orientation="-" zOffset="2" hOffset="0.5" pitch="0.1" roll="0.2" type="206"/>
        <signal s="20" t="8" id="light" orientation="+" type="1000001"/>
    "#});
    let (map, _) = Map::expect(&xml);

    let sign = map.signal("sign").unwrap().transform();
    assert_eq!(sign.location.x, 20.0);
    assert_eq!(sign.location.y, -8.0);
    assert_eq!(sign.location.z, 2.0);
    assert_eq!(sign.rotation.yaw, 0.5);
    assert_eq!(sign.rotation.pitch, 0.1);
    assert_eq!(sign.rotation.roll, 0.2);

    // Traffic lights move forward along their heading.
    let light = map.signal("light").unwrap().transform();
    assert_eq!(light.location.x, 20.25);
    assert_eq!(light.location.y, 8.0);
}

#[test]
fn signal_transform_follows_road_heading() {
    let xml = document(&line_road(
        3,
        -1,
        (5.0, 5.0, std::f64::consts::FRAC_PI_2),
        40.0,
        "",
        r#"<signals><signal s="10" t="2" id="s" orientation="+" type="206"/></signals>"#,
    ));
    let (map, _) = Map::expect(&xml);

    let transform = map.signal("s").unwrap().transform();
    assert!((transform.location.x - 3.0).abs() < 1e-9);
    assert!((transform.location.y - 15.0).abs() < 1e-9);
    assert_eq!(transform.rotation.yaw, std::f64::consts::FRAC_PI_2);
}

#[test]
fn inertial_signals_keep_their_pose() {
    let xml = road_with_signals(indoc! {r#"
        <signal s="20" t="-8" id="s" orientation="-" type="206">
          <positionInertial x="7" y="8" z="9" hdg="1.5" pitch="0" roll="0"/>
        </signal>
    "#});
    let (map, _) = Map::expect(&xml);

    let transform = map.signal("s").unwrap().transform();
    assert_eq!(transform.location.x, 7.0);
    assert_eq!(transform.location.y, 8.0);
    assert_eq!(transform.location.z, 9.0);
    assert_eq!(transform.rotation.yaw, 1.5);
}

#[test]
fn controllers_link_signals_and_junctions() {
    let xml = road_with_signals(
        r#"<signal s="20" t="8" id="light" orientation="+" type="1000001"/>"#,
    )
    .replace(
        "</OpenDRIVE>",
        indoc! {r#"
            <controller id="c1" name="north" sequence="1">
              <control signalId="light" type="0"/>
              <control signalId="ghost" type="0"/>
            </controller>
            <junction id="100" name="j">
              <controller id="c1" type="0"/>
              <controller id="c9" type="0"/>
            </junction>
            </OpenDRIVE>
        "#},
    );
    let (map, diagnostics) = Map::expect(&xml);

    assert!(map.signal("light").unwrap().controllers().contains("c1"));
    assert!(map.controller("c1").unwrap().junctions().contains(&100));
    insta::assert_snapshot!(
        messages(&diagnostics, DiagnosticKind::UnresolvedSignal).join("\n"),
        @"signal `ghost` is not defined"
    );
    insta::assert_snapshot!(
        messages(&diagnostics, DiagnosticKind::UnresolvedController).join("\n"),
        @"controller `c9` is not defined"
    );
}
