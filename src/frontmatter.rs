//! Frontmatter Splitting and Markdown Serialization
//!
//! The definition formats share one document shape: a YAML field block
//! delimited by `---` lines, followed by a free-form Markdown body.
//!
//! ```text
//! ---
//! name: my-tool
//! description: Does something useful
//! ---
//!
//! Instructions go here in Markdown...
//! ```
//!
//! Splitting is deliberately forgiving: text without a leading delimiter,
//! a delimiter with no closing counterpart, or an unparsable field block
//! all degrade to "no frontmatter" with the whole text as body.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A frontmatter mapping paired with a Markdown body.
///
/// Field order in `frontmatter` is preserved through serialization, so
/// callers control the on-disk key order by construction order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub frontmatter: Mapping,
    pub body: String,
}

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

/// Split raw text into a frontmatter mapping and a body.
///
/// Returns an empty mapping when the text does not start with `---`, when
/// the closing delimiter is missing, or when the field block is not valid
/// YAML (or not a mapping). The body is always the trimmed remainder, or
/// the trimmed full text in the degenerate cases.
pub fn split_frontmatter(raw: &str) -> (Mapping, String) {
    if !raw.trim_start().starts_with("---") {
        return (Mapping::new(), raw.trim().to_string());
    }

    // At most three segments: before the opening delimiter (whitespace),
    // the field block, and the body. Further `---` lines stay in the body.
    let parts: Vec<&str> = raw.splitn(3, "---").collect();
    if parts.len() < 3 {
        return (Mapping::new(), raw.trim().to_string());
    }

    (parse_fields(parts[1]), parts[2].trim().to_string())
}

/// Parse a frontmatter field block, degrading to an empty mapping.
fn parse_fields(block: &str) -> Mapping {
    match serde_yaml::from_str::<Value>(block) {
        Ok(Value::Mapping(fields)) => fields,
        Ok(_) | Err(_) => Mapping::new(),
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Render a document to its on-disk Markdown form.
///
/// Frontmatter keys keep their insertion order; collections are emitted in
/// block style with unicode intact. The output always ends with a single
/// trailing newline after the body.
pub fn render_document(doc: &Document) -> Result<String> {
    let fields =
        serde_yaml::to_string(&doc.frontmatter).context("Failed to serialize frontmatter")?;

    let mut out = String::with_capacity(fields.len() + doc.body.len() + 16);
    out.push_str("---\n");
    out.push_str(&fields);
    out.push_str("---\n\n");
    out.push_str(&doc.body);
    out.push('\n');
    Ok(out)
}

/// Render a document and write it to `path`.
///
/// A failed write may leave a truncated file behind; the batch reports the
/// error and moves on rather than cleaning up.
pub fn write_document(path: &Path, doc: &Document) -> Result<()> {
    let rendered = render_document(doc)?;
    fs::write(path, rendered)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
