use roxmltree::Node;
use tracing::warn;

use super::child;
use crate::builder::MapBuilder;
use crate::diagnostics::DiagnosticKind;
use crate::map::GeoReference;

/// `<header><geoReference>` holds a PROJ string in its text.
pub(super) fn parse(root: Node<'_, '_>, builder: &mut MapBuilder) {
    let header = child(root, "header");
    let node = header.and_then(|h| child(h, "geoReference"));
    let parsed = node
        .and_then(|n| n.text())
        .and_then(|text| GeoReference::parse(text.trim()));

    match parsed {
        Some(geo_reference) => builder.set_geo_reference(geo_reference),
        None => {
            let fallback = GeoReference::default();
            warn!(
                latitude = fallback.latitude,
                longitude = fallback.longitude,
                "no usable geo reference, using the default"
            );
            let span = node.or(header).unwrap_or(root).range();
            builder
                .diagnostics
                .report(DiagnosticKind::MissingGeoReference, span)
                .message(format!(
                    "using lat {} lon {}",
                    fallback.latitude, fallback.longitude
                ))
                .hint("expected `+lat_0=<deg> +lon_0=<deg>`")
                .emit();
        }
    }
}
