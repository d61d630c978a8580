//! Whole-document linting.
//!
//! The analyzer judges one (spec node, platform) view at a time; the linter
//! fans out over every node of the document and every platform the node
//! supports, aggregating the per-run diagnostics in traversal order.

use tracing::debug;

use bale_core::platform::Platform;
use bale_core::specification::{Document, SpecId};

use crate::analyzer::Analyzer;
use crate::result::Results;

/// Runs the analyzer over every (spec node, platform) pair of a document.
pub struct Linter<'a> {
    doc: &'a Document,
}

impl<'a> Linter<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Linter { doc }
    }

    /// Lint the whole document: every node in pre-order, every supported
    /// platform in canonical order.
    pub fn lint(&self) -> Results {
        let mut all = Results::new();
        for id in self.doc.all() {
            for platform in self.doc.available_platforms(id) {
                all.extend(self.lint_one(id, platform));
            }
        }
        all
    }

    /// Run one analysis with a fresh sink and return it.
    pub fn lint_one(&self, id: SpecId, platform: Platform) -> Results {
        let consumer = self.doc.consumer(id, platform);
        debug!(spec = consumer.spec().name(), %platform, "analyzing");
        let mut results = Results::new();
        Analyzer::new(&consumer).analyze(&mut results);
        results
    }
}
