//! System Prompt Embedding
//!
//! The inverse of conversion: fold a standalone `SKILL.md` document into
//! the matching `tool.yaml` as its `system_prompt`, and replace the
//! `implementation` block with the embedded marker. The skill text goes
//! in raw and unsplit; conversion later takes it back apart.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::batch::Outcome;
use crate::convert::read_record;

/// Marker written into `implementation` once a skill has been embedded.
#[derive(Debug, Serialize)]
struct EmbeddedImplementation {
    #[serde(rename = "type")]
    kind: &'static str,
    scripts_directory: &'static str,
}

impl EmbeddedImplementation {
    fn marker() -> Self {
        Self {
            kind: "embedded",
            scripts_directory: "scripts",
        }
    }
}

/// Embed the skill document at `skill_md` into `tool_yaml`, in place.
///
/// Tools whose `implementation` no longer references a skill directory
/// have already been migrated and are skipped.
pub fn embed_skill(tool_yaml: &Path, skill_md: &Path) -> Result<Outcome> {
    let skill_content = fs::read_to_string(skill_md)
        .with_context(|| format!("Failed to read {}", skill_md.display()))?;

    let mut record = read_record(tool_yaml)?;

    if !apply_embedding(&mut record, skill_content)? {
        return Ok(Outcome::Skipped("No skill_directory reference".to_string()));
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(record))
        .with_context(|| format!("Failed to serialize {}", tool_yaml.display()))?;
    fs::write(tool_yaml, serialized)
        .with_context(|| format!("Failed to write {}", tool_yaml.display()))?;

    debug!("Embedded {} into {}", skill_md.display(), tool_yaml.display());
    Ok(Outcome::Converted("Updated".to_string()))
}

/// Set `system_prompt` and the embedded marker on a tool record.
///
/// Returns `false` without touching the record when the guard fires: an
/// `implementation` field that exists but never mentions `skill_directory`
/// means the tool was embedded (or hand-migrated) on an earlier run.
fn apply_embedding(record: &mut Mapping, skill_content: String) -> Result<bool> {
    if let Some(implementation) = record.get("implementation") {
        let serialized = serde_yaml::to_string(implementation)
            .context("Failed to serialize implementation field")?;
        if !serialized.contains("skill_directory") {
            return Ok(false);
        }
    }

    record.insert("system_prompt".into(), Value::String(skill_content));

    let marker = serde_yaml::to_value(EmbeddedImplementation::marker())
        .context("Failed to build embedded implementation marker")?;
    record.insert("implementation".into(), marker);

    Ok(true)
}
