use std::ops::Range;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Only malformed attribute values are errors. Everything else is a
/// recoverable condition: a default is substituted, or the offending element
/// is skipped, and the load continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Attribute text that does not parse as the expected type
    InvalidAttribute,

    // Plan view problems, the segment is dropped
    InvalidGeometry,
    UnknownGeometryKind,

    // Defaults substituted while parsing
    MissingGeoReference,
    MissingLaneWidth,

    // Signal resolution
    MissingValidity,
    ZeroLaneValidity,
    UnresolvedSignal,
    UnresolvedController,

    // Read-only geometry checks
    SignalOnDrivingLane,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::InvalidAttribute => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::InvalidAttribute => "invalid attribute value",
            Self::InvalidGeometry => "geometry segment has no length",
            Self::UnknownGeometryKind => "unknown geometry kind",
            Self::MissingGeoReference => "missing geo reference",
            Self::MissingLaneWidth => "lane has no width",
            Self::MissingValidity => "signal reference has no validity",
            Self::ZeroLaneValidity => "signal reference only applies to the center lane",
            Self::UnresolvedSignal => "signal reference points to an unknown signal",
            Self::UnresolvedController => "unknown controller",
            Self::SignalOnDrivingLane => "signal overlaps a driving lane",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::InvalidAttribute => "invalid attribute value: {}".to_string(),
            Self::UnknownGeometryKind => "unknown geometry kind `{}`".to_string(),
            Self::UnresolvedSignal => "signal `{}` is not defined".to_string(),
            Self::UnresolvedController => "controller `{}` is not defined".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RelatedInfo {
    pub(crate) range: Range<usize>,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub(crate) fn new(range: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: Range<usize>,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, range: Range<usize>) -> Self {
        Self {
            kind,
            range,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.range.start,
            self.range.end,
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.range.start, related.range.end
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
