//! Platform-resolved, read-only projection over one specification node.
//!
//! A [`Consumer`] binds one spec node and one platform, and resolves each
//! attribute by merging the node's plain declaration with the matching
//! per-platform override block, pulling the parent's resolved value
//! underneath for inherited attributes. All accessors are pure reads over
//! the already-validated document.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::trace;

use crate::attribute::{self, Attribute};
use crate::platform::Platform;
use crate::specification::{Document, SpecId, SpecNode};
use crate::value::{self, Patterns};

/// A platform-resolved view over one specification node.
#[derive(Debug, Clone, Copy)]
pub struct Consumer<'a> {
    doc: &'a Document,
    spec: SpecId,
    platform: Platform,
}

impl<'a> Consumer<'a> {
    pub fn new(doc: &'a Document, spec: SpecId, platform: Platform) -> Self {
        Consumer {
            doc,
            spec,
            platform,
        }
    }

    /// The document this view reads from.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// The bound specification node.
    pub fn spec(&self) -> &'a SpecNode {
        self.doc.node(self.spec)
    }

    pub fn spec_id(&self) -> SpecId {
        self.spec
    }

    /// The bound platform, comparable against attribute-hash keys via
    /// [`Platform::as_str`].
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Resolved patterns for any file-pattern attribute from the catalog.
    pub fn patterns(&self, attr: &Attribute) -> Patterns {
        debug_assert!(attr.file_patterns, "not a file-pattern attribute");
        self.resolved_patterns(attr)
    }

    pub fn source_files(&self) -> Patterns {
        self.named_patterns("source_files")
    }

    pub fn resources(&self) -> Patterns {
        self.named_patterns("resources")
    }

    pub fn resource_bundles(&self) -> Patterns {
        self.named_patterns("resource_bundles")
    }

    pub fn preserve_paths(&self) -> Patterns {
        self.named_patterns("preserve_paths")
    }

    pub fn vendored_libraries(&self) -> Patterns {
        self.named_patterns("vendored_libraries")
    }

    pub fn vendored_frameworks(&self) -> Patterns {
        self.named_patterns("vendored_frameworks")
    }

    /// Resolved dependencies: name to requirement list, with per-platform
    /// declarations merged in.
    pub fn dependencies(&self) -> BTreeMap<String, Vec<String>> {
        let node = self.spec();
        let mut deps = node
            .raw("dependencies")
            .map(normalize_deps)
            .unwrap_or_default();
        if let Some(declared) = self
            .platform_block(node)
            .and_then(|block| block.get("dependencies"))
            .filter(|v| !v.is_null())
        {
            for (name, requirements) in normalize_deps(declared) {
                deps.entry(name).or_default().extend(requirements);
            }
        }
        deps
    }

    /// Resolved ARC requirement, if any declaration is reachable. The
    /// platform override wins over the plain declaration; unset values fall
    /// back to the parent chain.
    pub fn requires_arc(&self) -> Option<bool> {
        let node = self.spec();
        let own = self
            .platform_block(node)
            .and_then(|block| block.get("requires_arc"))
            .filter(|v| !v.is_null())
            .or_else(|| node.raw("requires_arc"));
        match own {
            Some(declared) => declared.as_bool(),
            None => node
                .parent()
                .and_then(|pid| Consumer::new(self.doc, pid, self.platform).requires_arc()),
        }
    }

    fn named_patterns(&self, name: &str) -> Patterns {
        let attr = attribute::find(name).expect("content attribute present in catalog");
        self.resolved_patterns(attr)
    }

    fn platform_block(&self, node: &'a SpecNode) -> Option<&'a Map<String, Value>> {
        node.raw(self.platform.as_str()).and_then(Value::as_object)
    }

    fn resolved_patterns(&self, attr: &Attribute) -> Patterns {
        let node = self.spec();
        trace!(attribute = attr.name, spec = node.name(), "resolving");

        let plain = node.raw(attr.name).map(normalize);
        let overridden = if attr.multi_platform {
            self.platform_block(node)
                .and_then(|block| block.get(attr.name))
                .filter(|v| !v.is_null())
                .map(normalize)
        } else {
            None
        };
        let own = match (plain, overridden) {
            (Some(base), Some(specific)) => Some(base.merge(specific)),
            (base, specific) => base.or(specific),
        };

        let inherited = if attr.inherited {
            node.parent()
                .map(|pid| Consumer::new(self.doc, pid, self.platform).resolved_patterns(attr))
        } else {
            None
        };

        match (inherited, own) {
            (Some(base), Some(own)) => base.merge(own),
            (Some(base), None) => base,
            (None, Some(own)) => own,
            (None, None) => Patterns::default(),
        }
    }
}

fn normalize(raw: &Value) -> Patterns {
    Patterns::from_value(raw).expect("attribute shapes validated at load")
}

fn normalize_deps(raw: &Value) -> BTreeMap<String, Vec<String>> {
    value::dependency_map(raw).expect("attribute shapes validated at load")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    #[test]
    fn platform_override_extends_plain_declaration() {
        let doc = doc(json!({
            "name": "A",
            "version": "0.1.0",
            "source_files": "Shared/*.c",
            "ios": {"source_files": "Ios/*.c"},
        }));
        let consumer = doc.consumer(doc.root(), Platform::Ios);
        let flat: Vec<_> = consumer.source_files().iter_flat().map(String::from).collect();
        assert_eq!(flat, ["Shared/*.c", "Ios/*.c"]);

        // A different platform sees only the plain declaration.
        let consumer = doc.consumer(doc.root(), Platform::Osx);
        assert_eq!(consumer.source_files().len(), 1);
    }

    #[test]
    fn grouped_resources_flatten() {
        let doc = doc(json!({
            "name": "A",
            "version": "0.1.0",
            "resource_bundles": {"Maps": ["maps/*.json"], "Strings": "strings/*.lproj"},
        }));
        let consumer = doc.consumer(doc.root(), Platform::Ios);
        let bundles = consumer.resource_bundles();
        assert_eq!(bundles.len(), 2);
        let flat: Vec<_> = bundles.iter_flat().collect();
        assert_eq!(flat, ["maps/*.json", "strings/*.lproj"]);
    }

    #[test]
    fn subspec_does_not_inherit_file_patterns() {
        let doc = doc(json!({
            "name": "A",
            "version": "0.1.0",
            "source_files": "Sources/*.c",
            "subspecs": [{"name": "Extra"}],
        }));
        let sub = doc.all().nth(1).unwrap();
        let consumer = doc.consumer(sub, Platform::Ios);
        assert!(consumer.source_files().is_empty());
    }

    #[test]
    fn dependencies_merge_platform_block() {
        let doc = doc(json!({
            "name": "A",
            "version": "0.1.0",
            "dependencies": {"zlib": "~> 1.2"},
            "ios": {"dependencies": {"metal-shim": ">= 2.0"}},
        }));
        let consumer = doc.consumer(doc.root(), Platform::Ios);
        let deps = consumer.dependencies();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps["zlib"], ["~> 1.2"]);

        let consumer = doc.consumer(doc.root(), Platform::Osx);
        assert_eq!(consumer.dependencies().len(), 1);
    }

    #[test]
    fn requires_arc_resolution_order() {
        let doc = doc(json!({
            "name": "A",
            "version": "0.1.0",
            "requires_arc": true,
            "ios": {"requires_arc": false},
            "subspecs": [{"name": "Sub"}],
        }));
        let root = doc.consumer(doc.root(), Platform::Ios);
        assert_eq!(root.requires_arc(), Some(false));
        let root_osx = doc.consumer(doc.root(), Platform::Osx);
        assert_eq!(root_osx.requires_arc(), Some(true));

        // The subspec falls back to the parent's declaration.
        let sub = doc.all().nth(1).unwrap();
        let sub_view = doc.consumer(sub, Platform::Ios);
        assert_eq!(sub_view.requires_arc(), Some(false));
    }

    #[test]
    fn requires_arc_unset_is_none() {
        let doc = doc(json!({"name": "A", "version": "0.1.0"}));
        let consumer = doc.consumer(doc.root(), Platform::Ios);
        assert_eq!(consumer.requires_arc(), None);
    }

    #[test]
    fn empty_when_nothing_declared() {
        let doc = doc(json!({"name": "A", "version": "0.1.0"}));
        let consumer = doc.consumer(doc.root(), Platform::Ios);
        assert!(consumer.source_files().is_empty());
        assert!(consumer.resources().is_empty());
        assert!(consumer.dependencies().is_empty());
    }
}
