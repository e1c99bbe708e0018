//! Per-key action commands.

use crate::cli::{output, Selection};
use crate::core::actions::Action;
use crate::core::domain::Outcome;
use crate::core::provider::KmsClient;
use crate::core::remediate::{self, RunReport};
use crate::error::{Error, Result};

/// Run `action` on the selected keys and report per key.
///
/// # Errors
///
/// Returns `Error::Incomplete` when any key failed, after printing the
/// report.
pub fn execute<C: KmsClient + ?Sized>(
    client: &C,
    action: Action,
    selection: &Selection,
    json: bool,
) -> Result<()> {
    let report = remediate::run(client, action, &selection.ids, &selection.filters())?;

    if json {
        output::data(&serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.failed() > 0 {
        return Err(Error::Incomplete {
            action: action.name(),
            failed: report.failed(),
            matched: report.matched,
        });
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    if report.results.is_empty() {
        output::dimmed("no keys matched");
        return;
    }

    for result in &report.results {
        let key = output::key(&result.key_id);
        match &result.outcome {
            Outcome::Done => match &result.key_state {
                Some(state) => output::success(&format!("{} {} ({})", report.action, key, state)),
                None => output::success(&format!("{} {}", report.action, key)),
            },
            Outcome::Skipped(reason) => output::warn(&format!("{} skipped: {}", key, reason)),
            Outcome::Failed(cause) => output::error(&format!("{} failed: {}", key, cause)),
        }
    }

    output::blank();
    output::kv("done   ", report.done());
    output::kv("skipped", report.skipped());
    output::kv("failed ", report.failed());
}
