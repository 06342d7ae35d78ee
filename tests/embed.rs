//! End-to-end embedding batch tests over a temporary plugins/ tree.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Mapping;
use tempfile::{tempdir, TempDir};

use defconv::batch::{run_convert, run_embed};
use defconv::frontmatter::split_frontmatter;

const SKILL_DOC: &str = "---\nname: echo\ndescription: Echoes input\n---\n# Echo\n\nRun the echo command.\n";

fn create_tool(root: &Path, plugin: &str, tool: &str, yaml: &str) -> PathBuf {
    let dir = root.join("plugins").join(plugin).join("tools").join(tool);
    fs::create_dir_all(&dir).expect("create tool directory");
    fs::write(dir.join("tool.yaml"), yaml).expect("write tool.yaml");
    dir
}

fn create_skill(root: &Path, plugin: &str, tool: &str, content: &str) {
    let dir = root.join("plugins").join(plugin).join("skills").join(tool);
    fs::create_dir_all(&dir).expect("create skill directory");
    fs::write(dir.join("SKILL.md"), content).expect("write SKILL.md");
}

fn read_record(path: &Path) -> Mapping {
    let raw = fs::read_to_string(path).expect("read tool.yaml");
    serde_yaml::from_str(&raw).expect("parse tool.yaml")
}

fn prepare_root() -> TempDir {
    tempdir().expect("create temp dir")
}

#[test]
fn embeds_skill_into_tool_definition() {
    let root = prepare_root();
    let tool_dir = create_tool(
        root.path(),
        "work",
        "echo",
        "name: echo\nimplementation:\n  type: skill\n  skill_directory: skills/echo\n",
    );
    create_skill(root.path(), "work", "echo", SKILL_DOC);

    let summary = run_embed(root.path()).expect("run embed batch");
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.errors, 0);

    let record = read_record(&tool_dir.join("tool.yaml"));
    // The raw skill document goes in whole, frontmatter and all.
    assert_eq!(
        record.get("system_prompt").unwrap().as_str(),
        Some(SKILL_DOC)
    );

    let implementation = record.get("implementation").unwrap().as_mapping().unwrap();
    assert_eq!(implementation.get("type").unwrap().as_str(), Some("embedded"));
    assert_eq!(
        implementation.get("scripts_directory").unwrap().as_str(),
        Some("scripts")
    );
}

#[test]
fn already_embedded_tool_is_skipped() {
    let root = prepare_root();
    let tool_dir = create_tool(
        root.path(),
        "repo",
        "done",
        "name: done\nimplementation:\n  type: bash\n  entry: run.sh\n",
    );
    create_skill(root.path(), "repo", "done", SKILL_DOC);

    let summary = run_embed(root.path()).expect("run embed batch");
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.errors, 0);

    // The record was left untouched.
    let record = read_record(&tool_dir.join("tool.yaml"));
    assert!(!record.contains_key("system_prompt"));
}

#[test]
fn missing_skill_document_is_skipped() {
    let root = prepare_root();
    create_tool(root.path(), "file", "lonely", "name: lonely\n");

    let summary = run_embed(root.path()).expect("run embed batch");
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.errors, 0);
}

#[test]
fn unknown_plugins_are_ignored() {
    let root = prepare_root();
    create_tool(root.path(), "custom", "echo", "name: echo\n");
    create_skill(root.path(), "custom", "echo", SKILL_DOC);

    let summary = run_embed(root.path()).expect("run embed batch");
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.errors, 0);
}

#[test]
fn unparsable_tool_definition_counts_as_error() {
    let root = prepare_root();
    create_tool(root.path(), "logs", "broken", "{ not: valid: yaml\n");
    create_skill(root.path(), "logs", "broken", SKILL_DOC);

    let summary = run_embed(root.path()).expect("run embed batch");
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.errors, 1);
}

#[test]
fn embed_then_convert_recovers_the_skill_body() {
    let root = prepare_root();
    let tool_dir = create_tool(
        root.path(),
        "spec",
        "echo",
        "name: echo\nimplementation:\n  type: skill\n  skill_directory: skills/echo\n",
    );
    create_skill(root.path(), "spec", "echo", SKILL_DOC);

    run_embed(root.path()).expect("run embed batch");
    let summary = run_convert(root.path()).expect("run convert batch");
    assert_eq!(summary.tools, 1);
    assert_eq!(summary.errors, 0);

    let rendered = fs::read_to_string(tool_dir.join("tool.md")).expect("read tool.md");
    let (fm, body) = split_frontmatter(&rendered);

    // Description comes from the skill frontmatter, the implementation
    // marker is normalized from embedded to bash, and the body is the
    // skill document's body.
    assert_eq!(fm.get("description").unwrap().as_str(), Some("Echoes input"));
    let implementation = fm.get("implementation").unwrap().as_mapping().unwrap();
    assert_eq!(implementation.get("type").unwrap().as_str(), Some("bash"));
    assert_eq!(body, "# Echo\n\nRun the echo command.");
}
