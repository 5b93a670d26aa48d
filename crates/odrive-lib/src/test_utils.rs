//! Fixtures and helpers shared by unit tests.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::load::{LoadConfig, Loader};
use crate::map::Map;

impl Map {
    #[track_caller]
    pub fn expect(xml: &str) -> (Self, Diagnostics) {
        Self::expect_with(xml, LoadConfig::default())
    }

    #[track_caller]
    pub fn expect_with(xml: &str, config: LoadConfig) -> (Self, Diagnostics) {
        match Loader::new(xml).with_config(config).load() {
            Ok(loaded) => loaded,
            Err(err) => panic!("expected a map, got: {err}"),
        }
    }

    /// Loads a document that must not produce errors.
    #[track_caller]
    pub fn expect_valid(xml: &str) -> Self {
        let (map, diagnostics) = Self::expect(xml);
        if diagnostics.has_errors() {
            panic!("expected no errors, got:\n{}", dump(&diagnostics));
        }
        map
    }
}

/// One line per diagnostic, without spans.
pub fn dump(diagnostics: &Diagnostics) -> String {
    diagnostics
        .iter()
        .map(|d| format!("{}: {}", d.severity(), d.message()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Messages of one diagnostic kind.
pub fn messages(diagnostics: &Diagnostics, kind: DiagnosticKind) -> Vec<String> {
    diagnostics
        .iter()
        .filter(|d| d.kind() == kind)
        .map(|d| d.message().to_string())
        .collect()
}

/// Wraps road-level elements into a document with a geo reference.
pub fn document(body: &str) -> String {
    format!(
        "<OpenDRIVE>\n<header><geoReference>+proj=tmerc +lat_0=48.5 +lon_0=9.25</geoReference></header>\n{body}\n</OpenDRIVE>"
    )
}

/// A straight road with driving lanes `1` and `-1`, both 3.5 m wide.
///
/// `link` goes inside the road's `<link>`, `extra` after `<lanes>`.
pub fn line_road(
    id: u32,
    junction: i32,
    start: (f64, f64, f64),
    length: f64,
    link: &str,
    extra: &str,
) -> String {
    let (x, y, hdg) = start;
    format!(
        r#"<road id="{id}" name="road {id}" length="{length}" junction="{junction}">
  <link>{link}</link>
  <planView><geometry s="0" x="{x}" y="{y}" hdg="{hdg}" length="{length}"><line/></geometry></planView>
  <lanes>
    <laneSection s="0">
      <left><lane id="1" type="driving"><width sOffset="0" a="3.5" b="0" c="0" d="0"/></lane></left>
      <center><lane id="0" type="none"/></center>
      <right><lane id="-1" type="driving"><width sOffset="0" a="3.5" b="0" c="0" d="0"/></lane></right>
    </laneSection>
  </lanes>
  {extra}
</road>"#
    )
}
