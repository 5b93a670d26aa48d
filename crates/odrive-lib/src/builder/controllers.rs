//! Controller links in both directions: controller to signals, junction to
//! controllers.

use tracing::warn;

use super::BuilderContext;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::map::Map;

pub(super) fn solve_controller_and_junction_references(
    map: &mut Map,
    context: &BuilderContext,
    diagnostics: &mut Diagnostics,
) {
    for link in &context.controller_signals {
        match map.signals.get_mut(&link.to) {
            Some(signal) => {
                signal.controllers.insert(link.from.clone());
            }
            None => {
                warn!(controller = %link.from, signal = %link.to, "controller lists an unknown signal");
                diagnostics
                    .report(DiagnosticKind::UnresolvedSignal, link.span.clone())
                    .message(link.to.as_str())
                    .hint(format!("listed by controller `{}`", link.from))
                    .emit();
            }
        }
    }

    for link in &context.junction_controllers {
        match map.controllers.get_mut(&link.to) {
            Some(controller) => {
                controller.junctions.insert(link.from);
            }
            None => {
                warn!(junction = link.from, controller = %link.to, "junction lists an unknown controller");
                diagnostics
                    .report(DiagnosticKind::UnresolvedController, link.span.clone())
                    .message(link.to.as_str())
                    .emit();
            }
        }
    }
}
