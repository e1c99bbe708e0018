//! Key listing command.

use crate::cli::{output, Selection};
use crate::core::provider::KmsClient;
use crate::core::remediate;
use crate::error::Result;

/// List the selected keys with their tags.
pub fn list<C: KmsClient + ?Sized>(client: &C, selection: &Selection, json: bool) -> Result<()> {
    let keys = remediate::select(client, &selection.ids, &selection.filters())?;

    if json {
        let result = serde_json::json!({
            "keys": keys,
            "count": keys.len()
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if keys.is_empty() {
        output::dimmed("no keys matched");
    } else {
        output::blank();
        output::header(&format!("{} keys", output::count(keys.len())));
        output::rule();
        for key in &keys {
            output::header(&output::key(&key.key_id));
            output::kv("spec     ", &key.key_spec);
            output::kv("state    ", &key.key_state);
            if let Some(alias) = &key.key_alias {
                output::kv("alias    ", alias);
            }
            if let Some(rotation) = &key.key_rotation_enabled {
                output::kv("rotation ", rotation);
            }
            if !key.tags.is_empty() {
                let tags: Vec<String> = key
                    .tags
                    .iter()
                    .map(|t| format!("{}={}", t.key, t.value))
                    .collect();
                output::kv("tags     ", tags.join(", "));
            }
        }
    }

    Ok(())
}
