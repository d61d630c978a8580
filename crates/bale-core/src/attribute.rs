//! The attribute schema catalog.
//!
//! A static description of every attribute a bale specification may declare:
//! its name, whether its value denotes file patterns, whether it may appear
//! inside per-platform override blocks, whether subspecs inherit it, and the
//! closed set of sub-keys for structured attributes. The table is constant
//! data built into the binary; consumers query it and never mutate it.

/// Schema entry for one specification attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written in manifests.
    pub name: &'static str,
    /// Whether the value denotes one or more relative path-glob patterns.
    pub file_patterns: bool,
    /// Whether the attribute may be overridden inside a platform block.
    pub multi_platform: bool,
    /// Whether a subspec inherits the parent's resolved value when unset.
    pub inherited: bool,
    /// Closed sub-key list for structured attributes, if any.
    pub keys: Option<&'static [&'static str]>,
}

const fn attr(
    name: &'static str,
    file_patterns: bool,
    multi_platform: bool,
    inherited: bool,
) -> Attribute {
    Attribute {
        name,
        file_patterns,
        multi_platform,
        inherited,
        keys: None,
    }
}

const fn keyed(name: &'static str, keys: &'static [&'static str]) -> Attribute {
    Attribute {
        name,
        file_patterns: false,
        multi_platform: false,
        inherited: false,
        keys: Some(keys),
    }
}

/// Every attribute the toolchain knows about.
pub const ATTRIBUTES: &[Attribute] = &[
    // Root metadata
    attr("name", false, false, false),
    attr("version", false, false, false),
    attr("summary", false, false, false),
    attr("description", false, false, false),
    attr("homepage", false, false, false),
    keyed("license", &["type", "file", "text"]),
    attr("authors", false, false, false),
    keyed(
        "source",
        &["git", "tag", "branch", "commit", "http", "sha256", "path"],
    ),
    attr("default_subspecs", false, false, false),
    // Platform support
    attr("platforms", false, false, true),
    // Build settings
    attr("requires_arc", false, true, true),
    attr("frameworks", false, true, true),
    attr("weak_frameworks", false, true, true),
    attr("libraries", false, true, true),
    attr("compiler_flags", false, true, true),
    attr("module_name", false, false, false),
    attr("prepare_command", false, false, false),
    // Lifecycle hooks (deprecated; flagged by the analyzer)
    attr("pre_install_hook", false, false, false),
    attr("post_install_hook", false, false, false),
    // Dependencies
    attr("dependencies", false, true, false),
    // File patterns
    attr("source_files", true, true, false),
    attr("public_header_files", true, true, false),
    attr("private_header_files", true, true, false),
    attr("exclude_files", true, true, false),
    attr("preserve_paths", true, true, false),
    attr("resources", true, true, false),
    attr("resource_bundles", true, true, false),
    attr("vendored_libraries", true, true, false),
    attr("vendored_frameworks", true, true, false),
];

/// All known attributes.
pub fn attributes() -> impl Iterator<Item = &'static Attribute> {
    ATTRIBUTES.iter()
}

/// Look up an attribute by name.
pub fn find(name: &str) -> Option<&'static Attribute> {
    ATTRIBUTES.iter().find(|a| a.name == name)
}

/// The attributes whose values denote file patterns.
pub fn file_pattern_attributes() -> impl Iterator<Item = &'static Attribute> {
    ATTRIBUTES.iter().filter(|a| a.file_patterns)
}
