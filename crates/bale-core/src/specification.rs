//! The bale specification document model.
//!
//! A specification is a tree: one root spec and any number of nested
//! subspecs, each carrying the attributes hash exactly as authored. The tree
//! is stored in an arena addressed by [`SpecId`], with parent back-references
//! and subspec ids in declaration order, so the parent chain is acyclic and
//! finite by construction.
//!
//! Attribute shapes are validated once at load. Everything downstream
//! (consumer resolution, analysis) relies on that and never re-checks.

use std::path::Path;

use serde_json::{Map, Value};

use crate::attribute;
use crate::consumer::Consumer;
use crate::error::{Result, SpecError};
use crate::platform::Platform;
use crate::value::{self, Patterns};

/// Identifier of one specification node within a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecId(pub(crate) usize);

/// One node of the specification tree.
#[derive(Debug, Clone)]
pub struct SpecNode {
    name: String,
    attributes: Map<String, Value>,
    parent: Option<SpecId>,
    subspecs: Vec<SpecId>,
}

impl SpecNode {
    /// Qualified name of this spec, e.g. `NetKit/Sockets` for a subspec.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw attributes hash, as authored, before platform resolution.
    /// The structural `subspecs` key is pulled out at build time; everything
    /// else is untouched.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// A raw declared value. Declaring a key with `null` is treated as not
    /// declaring it at all.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    pub fn parent(&self) -> Option<SpecId> {
        self.parent
    }

    pub fn subspecs(&self) -> &[SpecId] {
        &self.subspecs
    }

    /// Whether a pre-install lifecycle hook was declared. The hook body is
    /// opaque; only presence matters.
    pub fn has_pre_install_hook(&self) -> bool {
        self.raw("pre_install_hook").is_some()
    }

    /// Whether a post-install lifecycle hook was declared.
    pub fn has_post_install_hook(&self) -> bool {
        self.raw("post_install_hook").is_some()
    }
}

/// A complete, immutable specification document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<SpecNode>,
}

impl Document {
    /// Build a document from a parsed JSON value and validate it.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut doc = Document { nodes: Vec::new() };
        doc.build_node(value, None)?;

        let root = &doc.nodes[0];
        let version = root
            .raw("version")
            .and_then(Value::as_str)
            .ok_or_else(|| SpecError::InvalidDocument {
                detail: "root `version` is required".to_string(),
            })?;
        semver::Version::parse(version)?;

        Ok(doc)
    }

    /// Parse a document from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Parse a document from a TOML string. TOML manifests are converted
    /// into the JSON value model, so both formats produce identical trees.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let value: toml::Value = toml::from_str(input)?;
        Self::from_value(serde_json::to_value(value)?)
    }

    /// Load a manifest from disk, dispatching on the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") | Some("balespec") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(SpecError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// The root specification.
    pub fn root(&self) -> SpecId {
        SpecId(0)
    }

    pub fn node(&self, id: SpecId) -> &SpecNode {
        &self.nodes[id.0]
    }

    /// All spec ids in pre-order (root first, then each subspec's subtree
    /// in declaration order).
    pub fn all(&self) -> impl Iterator<Item = SpecId> + '_ {
        (0..self.nodes.len()).map(SpecId)
    }

    /// A platform-resolved read-only view over one node.
    pub fn consumer(&self, id: SpecId, platform: Platform) -> Consumer<'_> {
        Consumer::new(self, id, platform)
    }

    /// The platforms a node supports: its own `platforms` declaration, else
    /// the nearest ancestor's, else every known platform.
    pub fn available_platforms(&self, id: SpecId) -> Vec<Platform> {
        let mut current = Some(id);
        while let Some(cursor) = current {
            let node = self.node(cursor);
            if let Some(value) = node.raw("platforms") {
                let declared = value
                    .as_object()
                    .expect("`platforms` shape validated at load");
                return declared
                    .keys()
                    .map(|key| key.parse().expect("platform keys validated at load"))
                    .collect();
            }
            current = node.parent();
        }
        Platform::ALL.to_vec()
    }

    fn build_node(&mut self, value: Value, parent: Option<SpecId>) -> Result<SpecId> {
        let Value::Object(mut map) = value else {
            return Err(SpecError::InvalidDocument {
                detail: "specification node must be an object".to_string(),
            });
        };

        let own_name = match map.get("name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(SpecError::MissingName),
        };
        let name = match parent {
            Some(pid) => format!("{}/{}", self.nodes[pid.0].name, own_name),
            None => own_name,
        };

        let subspecs_raw = match map.remove("subspecs") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(SpecError::InvalidDocument {
                    detail: format!("`subspecs` of `{name}` must be a list of specifications"),
                })
            }
        };

        validate_shapes(&name, &map)?;

        let id = SpecId(self.nodes.len());
        self.nodes.push(SpecNode {
            name,
            attributes: map,
            parent,
            subspecs: Vec::new(),
        });

        let mut children = Vec::with_capacity(subspecs_raw.len());
        for sub in subspecs_raw {
            children.push(self.build_node(sub, Some(id))?);
        }
        self.nodes[id.0].subspecs = children;

        Ok(id)
    }
}

/// Shape-check every declared attribute of one node, including its
/// per-platform override blocks.
fn validate_shapes(spec: &str, map: &Map<String, Value>) -> Result<()> {
    validate_block(spec, map)?;

    for platform in Platform::ALL {
        let Some(block) = map.get(platform.as_str()).filter(|v| !v.is_null()) else {
            continue;
        };
        let inner = block.as_object().ok_or_else(|| SpecError::InvalidShape {
            spec: spec.to_string(),
            attribute: platform.as_str().to_string(),
            detail: "platform override block must be a mapping".to_string(),
        })?;
        validate_block(spec, inner)?;
    }

    if let Some(platforms) = map.get("platforms").filter(|v| !v.is_null()) {
        let declared = platforms
            .as_object()
            .ok_or_else(|| SpecError::InvalidShape {
                spec: spec.to_string(),
                attribute: "platforms".to_string(),
                detail: "must be a mapping from platform name to minimum version".to_string(),
            })?;
        for (key, minimum) in declared {
            key.parse::<Platform>()?;
            if !(minimum.is_null() || minimum.is_string()) {
                return Err(SpecError::InvalidShape {
                    spec: spec.to_string(),
                    attribute: "platforms".to_string(),
                    detail: format!("minimum version for `{key}` must be a string"),
                });
            }
        }
    }

    Ok(())
}

fn validate_block(spec: &str, map: &Map<String, Value>) -> Result<()> {
    for attr in attribute::attributes() {
        let Some(declared) = map.get(attr.name).filter(|v| !v.is_null()) else {
            continue;
        };
        if attr.file_patterns {
            Patterns::from_value(declared).map_err(|e| SpecError::InvalidShape {
                spec: spec.to_string(),
                attribute: attr.name.to_string(),
                detail: e.to_string(),
            })?;
        } else if attr.name == "dependencies" {
            value::dependency_map(declared).map_err(|e| SpecError::InvalidShape {
                spec: spec.to_string(),
                attribute: attr.name.to_string(),
                detail: e.to_string(),
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Document {
        Document::from_value(json!({
            "name": "NetKit",
            "version": "1.2.0",
            "summary": "Sockets without tears",
            "platforms": {"ios": "12.0", "osx": null},
            "source_files": "Sources/**/*.c",
            "subspecs": [
                {
                    "name": "Sockets",
                    "source_files": ["Sockets/*.c", "Sockets/*.h"],
                },
                {
                    "name": "TLS",
                    "dependencies": {"boringssl": "~> 3.0"},
                    "subspecs": [{"name": "Pinning", "source_files": "Pinning/*.c"}],
                },
            ],
        }))
        .unwrap()
    }

    #[test]
    fn builds_qualified_tree() {
        let doc = sample();
        let names: Vec<_> = doc.all().map(|id| doc.node(id).name().to_string()).collect();
        assert_eq!(
            names,
            ["NetKit", "NetKit/Sockets", "NetKit/TLS", "NetKit/TLS/Pinning"]
        );

        let root = doc.node(doc.root());
        assert_eq!(root.subspecs().len(), 2);
        assert!(root.parent().is_none());

        let pinning = doc
            .all()
            .find(|id| doc.node(*id).name() == "NetKit/TLS/Pinning")
            .unwrap();
        let tls = doc.node(pinning).parent().unwrap();
        assert_eq!(doc.node(tls).name(), "NetKit/TLS");
    }

    #[test]
    fn subspecs_key_is_structural() {
        let doc = sample();
        assert!(doc.node(doc.root()).attributes().get("subspecs").is_none());
    }

    #[test]
    fn raw_filters_null() {
        let doc = Document::from_value(json!({
            "name": "A",
            "version": "0.1.0",
            "requires_arc": null,
            "source_files": "a.c",
        }))
        .unwrap();
        let root = doc.node(doc.root());
        assert!(root.raw("requires_arc").is_none());
        assert!(root.raw("source_files").is_some());
    }

    #[test]
    fn hook_presence() {
        let doc = Document::from_value(json!({
            "name": "A",
            "version": "0.1.0",
            "pre_install_hook": "ruby prepare.rb",
        }))
        .unwrap();
        let root = doc.node(doc.root());
        assert!(root.has_pre_install_hook());
        assert!(!root.has_post_install_hook());
    }

    #[test]
    fn available_platforms_inherit_and_default() {
        let doc = sample();
        assert_eq!(
            doc.available_platforms(doc.root()),
            [Platform::Ios, Platform::Osx]
        );
        // Subspec with no own declaration inherits the root's.
        let sockets = SpecId(1);
        assert_eq!(
            doc.available_platforms(sockets),
            [Platform::Ios, Platform::Osx]
        );

        let bare = Document::from_value(json!({"name": "B", "version": "0.1.0"})).unwrap();
        assert_eq!(bare.available_platforms(bare.root()), Platform::ALL);
    }

    #[test]
    fn reject_missing_name() {
        let result = Document::from_value(json!({"version": "0.1.0"}));
        assert!(matches!(result, Err(SpecError::MissingName)));

        let result = Document::from_value(json!({
            "name": "A",
            "version": "0.1.0",
            "subspecs": [{"source_files": "a.c"}],
        }));
        assert!(matches!(result, Err(SpecError::MissingName)));
    }

    #[test]
    fn reject_bad_version() {
        let result = Document::from_value(json!({"name": "A"}));
        assert!(matches!(result, Err(SpecError::InvalidDocument { .. })));

        let result = Document::from_value(json!({"name": "A", "version": "one point two"}));
        assert!(matches!(result, Err(SpecError::Version(_))));
    }

    #[test]
    fn reject_bad_pattern_shape() {
        let result = Document::from_value(json!({
            "name": "A",
            "version": "0.1.0",
            "source_files": 42,
        }));
        assert!(matches!(
            result,
            Err(SpecError::InvalidShape { ref attribute, .. }) if attribute == "source_files"
        ));
    }

    #[test]
    fn reject_bad_platform_block() {
        let result = Document::from_value(json!({
            "name": "A",
            "version": "0.1.0",
            "ios": ["not", "a", "block"],
        }));
        assert!(matches!(result, Err(SpecError::InvalidShape { .. })));

        // Shapes inside platform blocks are checked too.
        let result = Document::from_value(json!({
            "name": "A",
            "version": "0.1.0",
            "ios": {"source_files": {"group": 1}},
        }));
        assert!(matches!(result, Err(SpecError::InvalidShape { .. })));
    }

    #[test]
    fn reject_unknown_platform_in_platforms() {
        let result = Document::from_value(json!({
            "name": "A",
            "version": "0.1.0",
            "platforms": {"amiga": "1.0"},
        }));
        assert!(matches!(result, Err(SpecError::UnknownPlatform { .. })));
    }

    #[test]
    fn toml_and_json_agree() {
        let from_toml = Document::from_toml_str(
            r#"
name = "NetKit"
version = "1.2.0"
source_files = ["Sources/**/*.c"]

[dependencies]
zlib = "~> 1.2"

[[subspecs]]
name = "Sockets"
source_files = "Sockets/*.c"
"#,
        )
        .unwrap();
        let from_json = Document::from_json_str(
            r#"{
                "name": "NetKit",
                "version": "1.2.0",
                "source_files": ["Sources/**/*.c"],
                "dependencies": {"zlib": "~> 1.2"},
                "subspecs": [{"name": "Sockets", "source_files": "Sockets/*.c"}]
            }"#,
        )
        .unwrap();

        let names = |doc: &Document| -> Vec<String> {
            doc.all().map(|id| doc.node(id).name().to_string()).collect()
        };
        assert_eq!(names(&from_toml), names(&from_json));
        assert_eq!(
            from_toml.node(from_toml.root()).raw("dependencies"),
            from_json.node(from_json.root()).raw("dependencies"),
        );
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("NetKit.balespec");
        std::fs::write(&json_path, r#"{"name": "NetKit", "version": "1.0.0"}"#).unwrap();
        assert!(Document::load(&json_path).is_ok());

        let toml_path = dir.path().join("NetKit.toml");
        std::fs::write(&toml_path, "name = \"NetKit\"\nversion = \"1.0.0\"\n").unwrap();
        assert!(Document::load(&toml_path).is_ok());

        let odd_path = dir.path().join("NetKit.yaml");
        std::fs::write(&odd_path, "name: NetKit").unwrap();
        assert!(matches!(
            Document::load(&odd_path),
            Err(SpecError::UnsupportedFormat { .. })
        ));
    }
}
