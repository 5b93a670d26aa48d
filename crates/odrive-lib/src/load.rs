use tracing::{debug, error};

use crate::builder::MapBuilder;
use crate::map::Map;
use crate::{Error, PassResult, parser};

const DEFAULT_CONFLICT_TOLERANCE: f64 = 2.0;
const DEFAULT_CONFLICT_SAMPLE_STEP: f64 = 1.0;
const DEFAULT_BOUNDING_BOX_INTERVALS: usize = 10;
const DEFAULT_SIGNAL_OVERLAP_RATIO: f64 = 0.7;

/// Tunables of the resolution passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadConfig {
    /// Lane polylines closer than this (in metres) make two junction roads conflict.
    pub conflict_tolerance: f64,
    /// Arc-length step used to sample lane polylines for conflict detection.
    pub conflict_sample_step: f64,
    /// Samples per lane used for junction bounding boxes.
    pub bounding_box_intervals: usize,
    /// Fraction of a driving lane's width around its centre that a signal
    /// must not fall into.
    pub signal_overlap_ratio: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            conflict_tolerance: DEFAULT_CONFLICT_TOLERANCE,
            conflict_sample_step: DEFAULT_CONFLICT_SAMPLE_STEP,
            bounding_box_intervals: DEFAULT_BOUNDING_BOX_INTERVALS,
            signal_overlap_ratio: DEFAULT_SIGNAL_OVERLAP_RATIO,
        }
    }
}

impl LoadConfig {
    pub fn with_conflict_tolerance(mut self, tolerance: f64) -> Self {
        self.conflict_tolerance = tolerance;
        self
    }

    pub fn with_conflict_sample_step(mut self, step: f64) -> Self {
        self.conflict_sample_step = step;
        self
    }

    pub fn with_bounding_box_intervals(mut self, intervals: usize) -> Self {
        self.bounding_box_intervals = intervals;
        self
    }

    pub fn with_signal_overlap_ratio(mut self, ratio: f64) -> Self {
        self.signal_overlap_ratio = ratio;
        self
    }
}

/// Loads one OpenDRIVE document.
pub struct Loader<'src> {
    source: &'src str,
    config: LoadConfig,
}

impl<'src> Loader<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            config: LoadConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LoadConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses, links and seals the map.
    ///
    /// Fails only when the text is not XML or the root is not `<OpenDRIVE>`.
    /// Everything else is reported in the returned diagnostics.
    pub fn load(self) -> PassResult<Map> {
        let document = roxmltree::Document::parse(self.source)?;
        let root = document.root_element();
        if root.tag_name().name() != "OpenDRIVE" {
            return Err(Error::MissingRoot(root.tag_name().name().to_string()));
        }

        let mut builder = MapBuilder::new();
        parser::parse(root, &mut builder);
        let (map, diagnostics) = builder.build(&self.config);

        debug!(
            roads = map.roads.len(),
            junctions = map.junctions.len(),
            signals = map.signals.len(),
            warnings = diagnostics.warning_count(),
            errors = diagnostics.error_count(),
            "map loaded"
        );
        Ok((map, diagnostics))
    }
}

/// Loads a map with the default configuration, discarding diagnostics.
///
/// `None` when the document cannot be parsed at all.
pub fn load(source: &str) -> Option<Map> {
    match Loader::new(source).load() {
        Ok((map, _)) => Some(map),
        Err(err) => {
            error!("unparsable OpenDRIVE document: {err}");
            None
        }
    }
}
