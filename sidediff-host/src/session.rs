//! One comparison: fetch both sides, parse, compare, summarize.

use std::thread;

use facet::Facet;
use sidediff::{Document, compare_documents, count_marks, parse};
use tracing::debug;

use crate::error::CompareError;
use crate::provider::DocumentProvider;

/// Per-side figures of a finished comparison.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct SideSummary {
    /// What was asked for (URL or path)
    pub target: String,
    /// Size of the fetched source
    pub bytes: u64,
    /// Members of the highlight set
    pub marks: u64,
}

/// Machine-readable outcome of a comparison.
#[derive(Facet, Debug, Clone, PartialEq)]
pub struct Summary {
    pub left: SideSummary,
    pub right: SideSummary,
}

impl Summary {
    /// No marks on either side.
    pub fn is_identical(&self) -> bool {
        self.left.marks == 0 && self.right.marks == 0
    }

    pub fn to_json(&self) -> Result<String, CompareError> {
        facet_json::to_string_pretty(self).map_err(|e| CompareError::Serialize {
            reason: e.to_string(),
        })
    }
}

/// Both annotated documents and their summary.
#[derive(Debug)]
pub struct Comparison {
    pub left: Document,
    pub right: Document,
    pub summary: Summary,
}

/// Drives a comparison with a given document source.
pub struct ComparisonSession<P> {
    provider: P,
}

impl<P: DocumentProvider + Sync> ComparisonSession<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch both targets concurrently, then compare their bodies.
    ///
    /// The first failing side (left before right) decides the error.
    pub fn run(&self, left: &str, right: &str) -> Result<Comparison, CompareError> {
        let (left_source, right_source) = thread::scope(|scope| {
            let right_handle = scope.spawn(|| self.provider.fetch(right));
            let left_source = self.provider.fetch(left);
            let right_source = match right_handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            };
            (left_source, right_source)
        });
        let (left_source, right_source) = (left_source?, right_source?);

        let mut left_doc = load(left, &left_source)?;
        let mut right_doc = load(right, &right_source)?;

        compare_documents(&mut left_doc, &mut right_doc);

        let summary = Summary {
            left: side_summary(left, &left_source, &left_doc),
            right: side_summary(right, &right_source, &right_doc),
        };
        debug!(
            left_marks = summary.left.marks,
            right_marks = summary.right.marks,
            "comparison finished"
        );

        Ok(Comparison {
            left: left_doc,
            right: right_doc,
            summary,
        })
    }
}

fn load(target: &str, source: &str) -> Result<Document, CompareError> {
    if source.trim().is_empty() {
        return Err(CompareError::EmptyDocument {
            target: target.to_owned(),
        });
    }
    let doc = parse(source);
    debug!(doc = target, bytes = source.len(), "parsed");
    Ok(doc)
}

fn side_summary(target: &str, source: &str, doc: &Document) -> SideSummary {
    SideSummary {
        target: target.to_owned(),
        bytes: source.len() as u64,
        marks: count_marks(doc, doc.root) as u64,
    }
}
