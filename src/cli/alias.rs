//! Create-key-with-alias command.

use std::time::Duration;

use crate::cli::{output, Session};
use crate::core::actions::AliasImport;
use crate::error::Result;

/// Provision missing aliases.
///
/// Command-line aliases and URL replace the configured ones when given.
pub fn execute(
    session: &Session,
    aliases: Vec<String>,
    obs_url: Option<String>,
    pace_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut import = AliasImport::from_config(&session.config.alias_import);
    if !aliases.is_empty() {
        import.key_aliases = aliases;
    }
    if let Some(url) = obs_url {
        import.obs_url = Some(url).filter(|u| !u.is_empty());
    }
    if let Some(ms) = pace_ms {
        import.pace = Duration::from_millis(ms);
    }

    let created = import.run(&session.kms, &session.obs)?;

    if json {
        let result = serde_json::json!({
            "created": created,
            "count": created.len()
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if created.is_empty() {
        output::dimmed("no aliases to create");
    } else {
        for pair in &created {
            output::success(&format!(
                "created alias/{} -> {}",
                pair.alias,
                output::key(&pair.key_id)
            ));
        }
    }
    Ok(())
}
