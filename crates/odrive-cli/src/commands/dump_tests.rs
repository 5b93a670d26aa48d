use serde_json::{Value, json};

use super::dump::render;
use super::input::read_document;
use super::test_utils::{ONE_ROAD, load, write_temp};

fn summary() -> Value {
    let file = write_temp(ONE_ROAD);
    let document = read_document(file.path()).unwrap();
    let (map, _) = load(&document.text);
    serde_json::from_str(&render(&map, true).unwrap()).unwrap()
}

#[test]
fn roads_and_lanes() {
    let summary = summary();
    let road = &summary["roads"][0];

    assert_eq!(road["id"], 1);
    assert_eq!(road["name"], "main");
    assert_eq!(road["length"], 100.0);
    assert_eq!(road["junction"], -1);
    assert_eq!(
        road["sections"][0]["lanes"][0],
        json!({"id": -1, "type": "driving", "width": 3.5, "next": []})
    );
    assert_eq!(road["sections"][0]["lanes"][1]["type"], "none");
}

#[test]
fn signals_and_references() {
    let summary = summary();

    assert_eq!(summary["signals"][0]["id"], "s1");
    assert_eq!(summary["signals"][0]["type"], "206");
    assert_eq!(summary["signals"][0]["transform"]["location"]["x"], 10.0);
    assert_eq!(
        summary["references"][0],
        json!({
            "road": 1,
            "signal": "s1",
            "s": 10.0,
            "resolved": true,
            "validities": [{"from_lane": -1, "to_lane": -1}]
        })
    );
}

#[test]
fn compact_and_pretty_agree() {
    let (map, _) = load(ONE_ROAD);
    let compact = render(&map, true).unwrap();
    let pretty = render(&map, false).unwrap();

    assert!(!compact.contains('\n'));
    assert!(pretty.contains('\n'));
    assert_eq!(
        serde_json::from_str::<Value>(&compact).unwrap(),
        serde_json::from_str::<Value>(&pretty).unwrap()
    );
    assert_eq!(summary()["geo_reference"]["latitude"], 48.5);
}
