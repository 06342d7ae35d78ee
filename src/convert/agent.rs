//! Agent Definition Converter
//!
//! Converts an `agent.yaml` record into an `agent.md` document. Unlike
//! tools, agents keep all their fields verbatim; only `system_prompt`
//! moves out of the frontmatter and into the body.

use std::path::Path;

use anyhow::Result;
use serde_yaml::{Mapping, Value};

use crate::batch::Outcome;
use crate::convert::{parent_dir_name, read_record, title_case, DEFAULT_VERSION};
use crate::frontmatter::{write_document, Document};

/// Convert a single `agent.yaml` to a sibling `agent.md`.
pub fn convert_agent_file(agent_yaml: &Path) -> Result<Outcome> {
    let agent_name = parent_dir_name(agent_yaml)?;
    let record = read_record(agent_yaml)?;

    let doc = build_agent_document(&record, &agent_name);
    let agent_md = agent_yaml.with_file_name("agent.md");
    write_document(&agent_md, &doc)?;

    Ok(Outcome::Converted("Converted to agent.md".to_string()))
}

/// Remap an agent record into a frontmatter+body document.
///
/// Every field except `system_prompt` is copied in order; `type` and
/// `version` are appended only when the record lacks them.
pub fn build_agent_document(record: &Mapping, dir_name: &str) -> Document {
    let system_prompt = record
        .get("system_prompt")
        .and_then(Value::as_str)
        .unwrap_or("");

    let mut fm = Mapping::new();
    for (key, value) in record {
        if key.as_str() == Some("system_prompt") {
            continue;
        }
        fm.insert(key.clone(), value.clone());
    }

    if !fm.contains_key("type") {
        fm.insert("type".into(), "agent".into());
    }
    if !fm.contains_key("version") {
        fm.insert("version".into(), DEFAULT_VERSION.into());
    }

    let body = if system_prompt.is_empty() {
        format!("# {}\n\n(No content)", title_case(dir_name))
    } else {
        system_prompt.to_string()
    };

    Document {
        frontmatter: fm,
        body,
    }
}
