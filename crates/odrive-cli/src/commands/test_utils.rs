use std::io::Write;

use odrive_lib::map::Map;
use odrive_lib::{Diagnostics, Loader};
use tempfile::NamedTempFile;

/// Road 1: 100 m east-bound, one 3.5 m driving lane, a stop sign at s=10.
pub const ONE_ROAD: &str = indoc::indoc! {r#"
    <OpenDRIVE>
      <header><geoReference>+proj=tmerc +lat_0=48.5 +lon_0=9.25</geoReference></header>
      <road id="1" name="main" length="100" junction="-1">
        <planView><geometry s="0" x="0" y="0" hdg="0" length="100"><line/></geometry></planView>
        <lanes>
          <laneSection s="0">
            <center><lane id="0" type="none"/></center>
            <right><lane id="-1" type="driving"><width sOffset="0" a="3.5" b="0" c="0" d="0"/></lane></right>
          </laneSection>
        </lanes>
        <signals>
          <signal s="10" t="-6" id="s1" name="Stop" orientation="-" type="206" dynamic="no">
            <validity fromLane="-1" toLane="-1"/>
          </signal>
        </signals>
      </road>
    </OpenDRIVE>
"#};

pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

pub fn load(xml: &str) -> (Map, Diagnostics) {
    Loader::new(xml).load().expect("loadable document")
}
