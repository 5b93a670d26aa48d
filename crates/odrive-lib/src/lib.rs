//! OpenDRIVE road-network compiler.
//!
//! Parses an OpenDRIVE document, links roads, lanes, junctions and signals
//! into one cross-referenced graph, and exposes it as an immutable [`Map`].
//!
//! # Example
//!
//! ```
//! let xml = r#"
//! <OpenDRIVE>
//!   <road id="1" length="100" junction="-1">
//!     <planView>
//!       <geometry s="0" x="0" y="0" hdg="0" length="100"><line/></geometry>
//!     </planView>
//!     <lanes>
//!       <laneSection s="0">
//!         <center><lane id="0" type="none"/></center>
//!         <right>
//!           <lane id="-1" type="driving"><width sOffset="0" a="3.5" b="0" c="0" d="0"/></lane>
//!         </right>
//!       </laneSection>
//!     </lanes>
//!   </road>
//! </OpenDRIVE>
//! "#;
//!
//! let map = odrive_lib::load(xml).expect("well-formed document");
//! assert_eq!(map.lane_width(1, -1, 50.0), Ok(3.5));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod builder;
pub mod diagnostics;
pub mod ids;
mod load;
pub mod map;
mod parser;

#[cfg(test)]
mod load_tests;
#[cfg(test)]
mod test_utils;

/// Result type for passes that produce both output and diagnostics.
///
/// Recoverable problems in the document become diagnostics next to the
/// output. Only an unreadable document uses the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use load::{LoadConfig, Loader, load};
pub use map::{Map, QueryError};

/// Errors that abort a load.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The text is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is something other than `<OpenDRIVE>`.
    #[error("root element is `{0}`, expected `OpenDRIVE`")]
    MissingRoot(String),
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, Error>;
