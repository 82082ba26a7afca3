//! Target input handling
//!
//! Targets come either from the `[[target]]` list of the config file or from
//! an interactive line-based session on stdin.

mod line;
mod session;

pub use line::parse_target_line;
pub use session::{read_targets, Session};

use crate::model::ScrapeTarget;

/// Ordered set of targets keyed by the parsed URL
///
/// Submitting a URL again, in any spelling that parses to the same URL,
/// replaces the earlier entry but keeps its original position. Each page is
/// scraped once and no two targets write the same result file.
#[derive(Debug, Default)]
pub struct TargetSet {
    targets: Vec<ScrapeTarget>,
}

impl TargetSet {
    /// Creates an empty target set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a target, returning true if it replaced an existing one
    pub fn insert(&mut self, target: ScrapeTarget) -> bool {
        match self
            .targets
            .iter_mut()
            .find(|existing| existing.url() == target.url())
        {
            Some(existing) => {
                *existing = target;
                true
            }
            None => {
                self.targets.push(target);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn into_targets(self) -> Vec<ScrapeTarget> {
        self.targets
    }
}
