//! The semantic check battery for one (specification node, platform) view.
//!
//! Every check is independent and appends zero or more diagnostics to the
//! caller's sink; none of them short-circuits the others. The analyzer has
//! no failure mode of its own; malformed content *is* what it reports.

use bale_core::attribute;
use bale_core::consumer::Consumer;
use bale_core::platform::Platform;

use crate::result::Results;

/// Runs the fixed battery of semantic checks against one consumer view.
pub struct Analyzer<'a> {
    consumer: &'a Consumer<'a>,
}

impl<'a> Analyzer<'a> {
    pub fn new(consumer: &'a Consumer<'a>) -> Self {
        Analyzer { consumer }
    }

    /// Execute every check, appending diagnostics in check order.
    ///
    /// The sink is caller-owned and append-only: invoking this twice against
    /// the same sink records every triggered diagnostic twice. Use a fresh
    /// sink per run.
    pub fn analyze(&self, results: &mut Results) {
        self.check_unknown_keys(results);
        self.validate_file_patterns(results);
        self.check_requires_arc(results);
        self.check_if_spec_is_empty(results);
        self.check_install_hooks(results);
    }

    /// Flag attribute keys the catalog does not know, which usually means a
    /// misspelling in the manifest. Platform names are valid keys (they open
    /// override blocks). For structured attributes with a closed sub-key
    /// list, unknown sub-keys are flagged as well.
    fn check_unknown_keys(&self, results: &mut Results) {
        let spec = self.consumer.spec();

        for key in spec.attributes().keys() {
            if attribute::find(key).is_none() && !Platform::is_platform_key(key) {
                results.add_warning("attributes", format!("Unrecognized `{key}` key."));
            }
        }

        for attr in attribute::attributes() {
            let Some(allowed) = attr.keys else { continue };
            let Some(declared) = spec.raw(attr.name).and_then(|v| v.as_object()) else {
                continue;
            };
            for key in declared.keys() {
                if !allowed.contains(&key.as_str()) {
                    results.add_warning(
                        "attributes",
                        format!("Unrecognized `{key}` key for `{}` attribute.", attr.name),
                    );
                }
            }
        }
    }

    /// Every resolved file pattern must be relative. One error per offending
    /// pattern, naming the attribute it came from.
    fn validate_file_patterns(&self, results: &mut Results) {
        for attr in attribute::file_pattern_attributes() {
            let patterns = self.consumer.patterns(attr);
            for pattern in patterns.iter_flat() {
                if pattern.starts_with('/') {
                    results.add_error(
                        "File Patterns",
                        format!(
                            "File patterns must be relative and cannot start with a slash \
                             (`{}`).",
                            attr.name
                        ),
                    );
                }
            }
        }
    }

    /// A `requires_arc` declaration must be reachable somewhere on the path
    /// from this node to the root, either directly or through a platform
    /// override block for the bound platform. Declaration presence is what
    /// counts: declaring `false` satisfies the check. Temporary, until the
    /// default flips to `true`.
    fn check_requires_arc(&self, results: &mut Results) {
        let doc = self.consumer.document();
        let platform_key = self.consumer.platform().as_str();

        let mut declared = false;
        let mut node = self.consumer.spec();
        loop {
            declared |= node.raw("requires_arc").is_some();
            declared |= node.raw(platform_key).is_some();
            match node.parent() {
                Some(parent) => node = doc.node(parent),
                None => break,
            }
        }

        if !declared {
            results.add_warning(
                "requires_arc",
                "A value for `requires_arc` should be specified until the migration \
                 to a `true` default.",
            );
        }
    }

    /// A leaf spec that resolves to no content at all is an authoring error.
    /// An umbrella spec that only carries subspecs is legitimate.
    fn check_if_spec_is_empty(&self, results: &mut Results) {
        let consumer = self.consumer;
        let no_patterns = consumer.source_files().is_empty()
            && consumer.resources().is_empty()
            && consumer.resource_bundles().is_empty()
            && consumer.preserve_paths().is_empty()
            && consumer.dependencies().is_empty()
            && consumer.vendored_libraries().is_empty()
            && consumer.vendored_frameworks().is_empty();

        if no_patterns && consumer.spec().subspecs().is_empty() {
            results.add_error(
                "File Patterns",
                format!(
                    "The `{}` spec is empty (no source files, resources, resource_bundles, \
                     preserve paths, vendored_libraries, vendored_frameworks, dependencies, \
                     or subspecs).",
                    consumer.spec().name()
                ),
            );
        }
    }

    /// Install hooks are deprecated; flag each one that is declared.
    fn check_install_hooks(&self, results: &mut Results) {
        let spec = self.consumer.spec();
        if spec.has_pre_install_hook() {
            results.add_warning(
                "pre_install_hook",
                "The pre install hook has been deprecated, use the `resource_bundles` \
                 or the `prepare_command` attributes.",
            );
        }
        if spec.has_post_install_hook() {
            results.add_warning(
                "post_install_hook",
                "The post install hook has been deprecated, use the `resource_bundles` \
                 or the `prepare_command` attributes.",
            );
        }
    }
}
