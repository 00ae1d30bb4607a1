//! Output de-duplication for one formatting run.

use std::collections::HashSet;

/// Outputs already emitted during a run.
#[derive(Debug, Default)]
pub struct SeenOutputs {
    seen: HashSet<String>,
}

impl SeenOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an output. Returns false if it was emitted before.
    pub fn insert(&mut self, output: &str) -> bool {
        if self.seen.contains(output) {
            return false;
        }
        self.seen.insert(output.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }
}
