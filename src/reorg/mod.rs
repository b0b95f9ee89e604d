//! The reorganizer: validate each source, resolve its destination, sweep its children.
//!
//! Sources are processed one after another and independently; a failure on one
//! source or one item is logged and never reaches the caller. The counters come
//! back as a `RunSummary`.

mod children;
mod destination;
mod exclude;
mod validate;

pub use children::{MoveTally, move_children};
pub use destination::{Destination, resolve_destination};
pub use exclude::ExclusionSet;
pub use validate::{SourceDir, validate_source};

use std::path::PathBuf;

use crate::gate::Gate;
use crate::log_sink::{Level, RunLog};

/// Settings the reorganizer reads; resolved from `Config` by the caller.
#[derive(Debug, Clone)]
pub struct Plan {
    pub child_name: String,
    pub exclusions: ExclusionSet,
    /// Keep previewing children when the gate declined creating a destination.
    pub dry_run: bool,
}

/// Counters accumulated over one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Sources that validated and reached destination resolution
    pub processed: usize,
    pub invalid_sources: usize,
    pub destination_failures: usize,
    pub moved: usize,
    pub failed_items: usize,
    pub declined: usize,
    pub excluded: usize,
}

impl RunSummary {
    /// True if any local error was logged during the run.
    pub fn has_failures(&self) -> bool {
        self.invalid_sources + self.destination_failures + self.failed_items > 0
    }

    fn add(&mut self, tally: MoveTally) {
        self.moved += tally.moved;
        self.failed_items += tally.failed;
        self.declined += tally.declined;
        self.excluded += tally.excluded;
    }
}

/// Reorganize every source in order and return the accumulated counters.
pub fn run(
    sources: &[PathBuf],
    plan: &Plan,
    log: &dyn RunLog,
    gate: &mut dyn Gate,
) -> RunSummary {
    let mut summary = RunSummary::default();

    log.log(
        Level::Info,
        &format!(
            "Run started: {} source path(s), destination '{}'{}",
            sources.len(),
            plan.child_name,
            if plan.dry_run { " (dry run)" } else { "" }
        ),
    );
    log.log(
        Level::Info,
        &format!("Exclusion patterns: {}", plan.exclusions.patterns().join(", ")),
    );

    for raw in sources {
        log.log(Level::Info, &format!("Processing {}", raw.display()));

        let source = match validate_source(raw) {
            Ok(s) => s,
            Err(err) => {
                log.log_error(&err);
                summary.invalid_sources += 1;
                log.log(Level::Info, &format!("Skipped {}: not a valid directory", raw.display()));
                continue;
            }
        };
        summary.processed += 1;

        let dest = match resolve_destination(&source, &plan.child_name, log, gate) {
            Ok(d) => d,
            Err(err) => {
                log.log_error(&err);
                summary.destination_failures += 1;
                log.log(Level::Info, &format!("Skipped {}: no destination", raw.display()));
                continue;
            }
        };

        if !dest.is_ready() && !plan.dry_run {
            log.log(
                Level::Info,
                &format!(
                    "Skipped {}: creating {} was declined",
                    raw.display(),
                    dest.path().display()
                ),
            );
            continue;
        }

        let tally = move_children(&source, &dest, &plan.exclusions, log, gate);
        summary.add(tally);
        log.log(
            Level::Info,
            &format!(
                "Finished {}: {} moved, {} failed, {} declined, {} excluded",
                raw.display(),
                tally.moved,
                tally.failed,
                tally.declined,
                tally.excluded
            ),
        );
    }

    log.log(
        Level::Info,
        &format!("Processed {} source paths", summary.processed),
    );
    log.log(Level::Info, "Run finished");
    summary
}
