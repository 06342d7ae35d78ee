//! Batch Drivers
//!
//! Walks the fixed `plugins/` layout, runs the per-file converters, and
//! reports per-item status lines plus a summary block. Items are fully
//! independent: one failure never blocks or rolls back the rest, and the
//! batch always runs to completion. The only fatal condition is being
//! unable to enumerate the plugins root itself.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use crate::convert::agent::convert_agent_file;
use crate::convert::tool::convert_tool_file;
use crate::embed::embed_skill;

/// Plugins processed by the embedding batch, in order.
pub const EMBED_PLUGINS: &[&str] = &[
    "work", "repo", "file", "codex", "docs", "logs", "spec", "status",
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Terminal state of a single discovered item.
///
/// Errors travel separately as `anyhow::Error`; a batch never retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The item was transformed and written; carries a status message.
    Converted(String),
    /// The item was deliberately left alone; carries the reason.
    Skipped(String),
}

/// Counts from a YAML-to-Markdown conversion run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConvertSummary {
    pub tools: usize,
    pub agents: usize,
    pub errors: usize,
}

/// Counts from a system-prompt embedding run.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbedSummary {
    pub updated: usize,
    pub skipped: usize,
    pub errors: usize,
}

// ---------------------------------------------------------------------------
// Conversion batch
// ---------------------------------------------------------------------------

/// Convert every `tool.yaml` and `agent.yaml` under `<root>/plugins/`.
///
/// Prints one status line per item and a summary block. Returns the
/// summary; the caller decides the process exit status from its error
/// count.
pub fn run_convert(root: &Path) -> Result<ConvertSummary> {
    let plugins_dir = root.join("plugins");
    let mut summary = ConvertSummary::default();

    println!("{}", "=== Converting YAML to Markdown Format ===".cyan());
    println!();

    println!("Converting tools...");
    for tool_yaml in discover_definitions(&plugins_dir, "tools", "tool.yaml")? {
        let label = item_label(&tool_yaml);
        match convert_tool_file(&tool_yaml) {
            Ok(Outcome::Converted(message)) => {
                println!("  {} {}: {}", "✓".green(), label, message);
                summary.tools += 1;
            }
            Ok(Outcome::Skipped(reason)) => {
                println!("  {} {}: {} (skipped)", "⚠".yellow(), label, reason);
            }
            Err(e) => {
                println!("  {} {}: {:#}", "✗".red(), label, e);
                summary.errors += 1;
            }
        }
    }
    println!();

    println!("Converting agents...");
    for agent_yaml in discover_definitions(&plugins_dir, "agents", "agent.yaml")? {
        let label = item_label(&agent_yaml);
        match convert_agent_file(&agent_yaml) {
            Ok(Outcome::Converted(message)) => {
                println!("  {} {}: {}", "✓".green(), label, message);
                summary.agents += 1;
            }
            Ok(Outcome::Skipped(reason)) => {
                println!("  {} {}: {} (skipped)", "⚠".yellow(), label, reason);
            }
            Err(e) => {
                println!("  {} {}: {:#}", "✗".red(), label, e);
                summary.errors += 1;
            }
        }
    }
    println!();

    println!("{}", "=== SUMMARY ===".cyan());
    println!("Tools converted: {}", summary.tools);
    println!("Agents converted: {}", summary.agents);
    println!("Errors: {}", summary.errors);
    println!();

    if summary.errors > 0 {
        println!("{}", "Some conversions had errors".yellow());
    } else {
        println!("{}", "All conversions completed successfully".green());
    }

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Embedding batch
// ---------------------------------------------------------------------------

/// Embed `SKILL.md` documents into the tools of the known plugins under
/// `<root>/plugins/`.
pub fn run_embed(root: &Path) -> Result<EmbedSummary> {
    let plugins_dir = root.join("plugins");
    let mut summary = EmbedSummary::default();

    println!("{}", "=== Embedding System Prompts ===".cyan());
    println!();

    for plugin in EMBED_PLUGINS {
        let tools_dir = plugins_dir.join(plugin).join("tools");
        if !tools_dir.is_dir() {
            debug!("No tools directory for plugin '{}'", plugin);
            continue;
        }

        println!("Processing {} plugin...", plugin);

        for tool_dir in sorted_subdirs(&tools_dir)? {
            let tool_name = dir_name(&tool_dir);

            let tool_yaml = tool_dir.join("tool.yaml");
            if !tool_yaml.is_file() {
                println!("  {} {}: No tool.yaml (skipping)", "⚠".yellow(), tool_name);
                continue;
            }

            let skill_md = plugins_dir
                .join(plugin)
                .join("skills")
                .join(&tool_name)
                .join("SKILL.md");
            if !skill_md.is_file() {
                println!(
                    "  {} {}: No SKILL.md in skills/ (skipping)",
                    "⚠".yellow(),
                    tool_name
                );
                summary.skipped += 1;
                continue;
            }

            match embed_skill(&tool_yaml, &skill_md) {
                Ok(Outcome::Converted(_)) => {
                    println!(
                        "  {} Embedded system_prompt for {}",
                        "✓".green(),
                        tool_name
                    );
                    summary.updated += 1;
                }
                Ok(Outcome::Skipped(reason)) => {
                    println!("  {} {}: {} (skipped)", "⚠".yellow(), tool_name, reason);
                    summary.skipped += 1;
                }
                Err(e) => {
                    println!("  {} {}: Error - {:#}", "✗".red(), tool_name, e);
                    summary.errors += 1;
                }
            }
        }

        println!();
    }

    println!("{}", "=== SUMMARY ===".cyan());
    println!("Tools updated: {}", summary.updated);
    println!("Tools skipped: {}", summary.skipped);
    println!("Errors: {}", summary.errors);
    println!();

    if summary.errors > 0 {
        println!("{}", "Some tools had errors".yellow());
    } else {
        println!("{}", "All system prompts embedded".green());
    }

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Find `plugins/*/<kind>/*/<file_name>` definition files.
///
/// Directory entries are visited in lexicographic order so runs are
/// deterministic. Plugins without a `<kind>` directory are skipped; an
/// unreadable plugins root is the one fatal error.
fn discover_definitions(plugins_dir: &Path, kind: &str, file_name: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for plugin_dir in sorted_subdirs(plugins_dir)? {
        let kind_dir = plugin_dir.join(kind);
        if !kind_dir.is_dir() {
            continue;
        }

        for item_dir in sorted_subdirs(&kind_dir)? {
            let candidate = item_dir.join(file_name);
            if candidate.is_file() {
                found.push(candidate);
            }
        }
    }

    debug!(
        "Discovered {} {} definitions under {}",
        found.len(),
        kind,
        plugins_dir.display()
    );
    Ok(found)
}

/// List a directory's subdirectories, sorted by path.
fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }

    dirs.sort();
    Ok(dirs)
}

/// `<plugin>/<item>` label for a definition file path.
fn item_label(definition: &Path) -> String {
    let mut ancestors = definition
        .components()
        .rev()
        .skip(1)
        .map(|c| c.as_os_str().to_string_lossy().into_owned());

    let item = ancestors.next().unwrap_or_default();
    // Skip the tools/ or agents/ directory between item and plugin.
    let plugin = ancestors.nth(1).unwrap_or_default();
    format!("{}/{}", plugin, item)
}

/// Final path component as a string.
fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_label() {
        let path = Path::new("plugins/work/tools/echo/tool.yaml");
        assert_eq!(item_label(path), "work/echo");

        let nested = Path::new("/srv/defs/plugins/repo/agents/planner/agent.yaml");
        assert_eq!(item_label(nested), "repo/planner");
    }

    #[test]
    fn test_dir_name() {
        assert_eq!(dir_name(Path::new("plugins/work/tools/echo")), "echo");
    }
}
