//! Tool Definition Converter
//!
//! Converts a `tool.yaml` record into a `tool.md` document. The record's
//! `system_prompt` usually carries a whole embedded skill document; its
//! frontmatter is folded into the output frontmatter and its body becomes
//! the Markdown body.

use std::path::Path;

use anyhow::Result;
use serde_yaml::{Mapping, Value};

use crate::batch::Outcome;
use crate::convert::{parent_dir_name, read_record, title_case, DEFAULT_VERSION};
use crate::frontmatter::{split_frontmatter, write_document, Document};

/// Convert a single `tool.yaml` to a sibling `tool.md`.
pub fn convert_tool_file(tool_yaml: &Path) -> Result<Outcome> {
    let tool_name = parent_dir_name(tool_yaml)?;
    let record = read_record(tool_yaml)?;

    let doc = build_tool_document(&record, &tool_name);
    let tool_md = tool_yaml.with_file_name("tool.md");
    write_document(&tool_md, &doc)?;

    Ok(Outcome::Converted("Converted to tool.md".to_string()))
}

/// Remap a tool record into a frontmatter+body document.
///
/// `dir_name` is the tool's directory name, used when neither the record
/// nor the embedded skill frontmatter names the tool.
pub fn build_tool_document(record: &Mapping, dir_name: &str) -> Document {
    let system_prompt = record
        .get("system_prompt")
        .and_then(Value::as_str)
        .unwrap_or("");

    if system_prompt.is_empty() {
        return utility_tool_document(record, dir_name);
    }

    let (skill_fields, skill_body) = split_frontmatter(system_prompt);

    let mut fm = Mapping::new();

    let name = record
        .get("name")
        .or_else(|| skill_fields.get("name"))
        .cloned()
        .unwrap_or_else(|| Value::from(dir_name));
    fm.insert("name".into(), name);
    fm.insert("type".into(), "tool".into());

    let description = record
        .get("description")
        .or_else(|| skill_fields.get("description"))
        .cloned()
        .unwrap_or_else(|| Value::from(""));
    fm.insert("description".into(), description);

    let version = record
        .get("version")
        .cloned()
        .unwrap_or_else(|| Value::from(DEFAULT_VERSION));
    fm.insert("version".into(), version);

    if let Some(tags) = record.get("tags").or_else(|| skill_fields.get("tags")) {
        fm.insert("tags".into(), tags.clone());
    }

    if let Some(schema) = record.get("input_schema") {
        fm.insert("parameters".into(), schema.clone());
    }

    if let Some(implementation) = record.get("implementation") {
        fm.insert(
            "implementation".into(),
            normalize_implementation(implementation.clone()),
        );
    }

    // Skill documents may pin a model; surface it as a nested llm.model
    // preference unless the record already produced one.
    if let Some(model) = skill_fields.get("model") {
        if !fm.contains_key("llm") {
            let mut llm = Mapping::new();
            llm.insert("model".into(), model.clone());
            fm.insert("llm".into(), Value::Mapping(llm));
        }
    }

    let body = if skill_body.is_empty() {
        format!("# {}\n\n(No content)", title_case(dir_name))
    } else {
        skill_body
    };

    Document {
        frontmatter: fm,
        body,
    }
}

/// Minimal document for tools with no system prompt at all.
fn utility_tool_document(record: &Mapping, dir_name: &str) -> Document {
    let name = record
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(dir_name);

    let mut fm = Mapping::new();
    fm.insert("name".into(), Value::from(name));
    fm.insert("type".into(), "tool".into());
    fm.insert(
        "description".into(),
        record
            .get("description")
            .cloned()
            .unwrap_or_else(|| Value::from("")),
    );
    fm.insert(
        "version".into(),
        record
            .get("version")
            .cloned()
            .unwrap_or_else(|| Value::from(DEFAULT_VERSION)),
    );

    Document {
        frontmatter: fm,
        body: format!(
            "# {}\n\nUtility tool with no system prompt.",
            title_case(name)
        ),
    }
}

/// Rewrite the deprecated `type: embedded` marker to `type: bash`,
/// leaving every other sub-field untouched.
fn normalize_implementation(implementation: Value) -> Value {
    match implementation {
        Value::Mapping(mut map) => {
            if map.get("type").and_then(Value::as_str) == Some("embedded") {
                map.insert("type".into(), "bash".into());
            }
            Value::Mapping(map)
        }
        other => other,
    }
}
