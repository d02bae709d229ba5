//! Playground result storage
//!
//! Holds the evaluation result of each playground command, indexed like the
//! commands themselves.

use serde::Serialize;

/// The result of evaluating one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalResult {
    /// Rendered value.
    pub value: String,
    /// Rendered type.
    #[serde(rename = "type")]
    pub ty: String,
    /// Set while the result is being recomputed.
    pub stale: bool,
}

/// Results for all commands of a playground.
#[derive(Debug, Clone, Default)]
pub struct ResultStorage {
    results: Vec<Option<EvalResult>>,
}

impl ResultStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the result for the command at `index`, growing the storage
    /// with empty entries if needed.
    pub fn report_result(&mut self, value: impl Into<String>, ty: impl Into<String>, index: usize) {
        if index >= self.results.len() {
            self.results.resize(index + 1, None);
        }
        self.results[index] = Some(EvalResult {
            value: value.into(),
            ty: ty.into(),
            stale: false,
        });
    }

    /// Discards all entries from `index` on.
    pub fn prune_at(&mut self, index: usize) {
        self.results.truncate(index);
    }

    /// Marks every current result as stale.
    pub fn invalidate(&mut self) {
        for result in self.results.iter_mut().flatten() {
            result.stale = true;
        }
    }

    /// Result for the command at `index`, if one was reported.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EvalResult> {
        self.results.get(index).and_then(Option::as_ref)
    }

    /// Number of entries, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
