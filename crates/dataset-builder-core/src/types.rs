use std::path::PathBuf;

use crate::fingerprint::Fingerprint;

/// Terminal state of one incoming file after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Could not be loaded as an image; left in place
    Skipped,

    /// Matched an indexed fingerprint; left in place and reported
    Duplicate {
        fingerprint: Fingerprint,
        original: PathBuf,
    },

    /// Novel image, moved into the reference collection and registered
    Relocated {
        fingerprint: Fingerprint,
        destination: PathBuf,
    },
}

/// Record of a classification pass over the incoming directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupSummary {
    /// Each incoming file with its outcome, in processing order
    pub files: Vec<(PathBuf, Outcome)>,
}

impl DedupSummary {
    pub fn record(&mut self, path: PathBuf, outcome: Outcome) {
        self.files.push((path, outcome));
    }

    pub fn relocated(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Relocated { .. }))
    }

    pub fn duplicates(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Duplicate { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped))
    }

    /// Outcome recorded for `path`, if it was processed
    pub fn outcome_of(&self, path: &std::path::Path) -> Option<&Outcome> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Counts from building the reference index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Files whose fingerprint was registered
    pub indexed: usize,

    /// Files whose fingerprint was already present; first registration kept
    pub collisions: usize,

    /// Files that failed to load as images
    pub skipped: usize,
}
