//! YAML-to-Markdown Converters
//!
//! One converter per definition kind: `tool.yaml` -> `tool.md` and
//! `agent.yaml` -> `agent.md`. Both read a YAML mapping, remap its fields
//! into frontmatter, and write a sibling Markdown document.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_yaml::{Mapping, Value};

pub mod agent;
pub mod tool;

/// Default version stamped onto records that carry none.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Read a definition file as an ordered YAML mapping.
pub(crate) fn read_record(path: &Path) -> Result<Mapping> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let value: Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse YAML in {}", path.display()))?;

    match value {
        Value::Mapping(record) => Ok(record),
        _ => bail!("{} is not a YAML mapping", path.display()),
    }
}

/// Directory name of the definition's folder, used as the name fallback.
pub(crate) fn parent_dir_name(path: &Path) -> Result<String> {
    let dir = path
        .parent()
        .with_context(|| format!("{} has no parent directory", path.display()))?;
    let name = dir
        .file_name()
        .with_context(|| format!("{} has no directory name", dir.display()))?;
    Ok(name.to_string_lossy().to_string())
}

/// Turn a definition name into a heading: `work-item` => `Work Item`.
///
/// Letters after a cased character are lowercased, matching how the
/// placeholder headings have always been generated.
pub(crate) fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_cased = false;

    for ch in name.chars() {
        if ch == '-' {
            out.push(' ');
            prev_cased = false;
        } else if ch.is_alphabetic() {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(ch);
            prev_cased = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("noop"), "Noop");
        assert_eq!(title_case("work-item"), "Work Item");
        assert_eq!(title_case("check-usdc-balance"), "Check Usdc Balance");
        assert_eq!(title_case("myTool"), "Mytool");
        assert_eq!(title_case("3d-render"), "3D Render");
    }

    #[test]
    fn test_parent_dir_name() {
        let path = Path::new("plugins/work/tools/echo/tool.yaml");
        assert_eq!(parent_dir_name(path).unwrap(), "echo");
    }
}
