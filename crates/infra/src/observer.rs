//! Resolve-event sink that writes to the process `tracing` subscriber.

use tracing::warn;

use roster_directory::{ResolveEvent, ResolveObserver};

/// Logs every [`ResolveEvent`] as a structured `warn` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ResolveObserver for TracingObserver {
    fn observe(&self, event: ResolveEvent) {
        match event {
            ResolveEvent::DanglingReference { parent, missing } => warn!(
                parent_id = %parent,
                direct_report_id = %missing,
                "direct report does not exist; skipping"
            ),
            ResolveEvent::LookupFailed {
                parent,
                child,
                reason,
            } => warn!(
                parent_id = %parent,
                direct_report_id = %child,
                %reason,
                "direct report lookup failed; skipping branch"
            ),
            ResolveEvent::CycleBroken { parent, child } => warn!(
                parent_id = %parent,
                direct_report_id = %child,
                "reporting cycle detected; edge ignored"
            ),
        }
    }
}
