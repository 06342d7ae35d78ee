//! defconv -- Plugin Definition Converter
//!
//! Batch-converts YAML plugin definitions (`tool.yaml`, `agent.yaml`)
//! into Markdown documents with YAML frontmatter, and performs the
//! inverse embedding step (folding a `SKILL.md` skill document into a
//! tool definition's `system_prompt`).

pub mod batch;
pub mod convert;
pub mod embed;
pub mod frontmatter;
