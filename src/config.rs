/// Store-wide validation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Reject edges whose endpoints are not nodes of the graph. With
    /// this off, edges may point at external ids, e.g. the reads of
    /// fragment records.
    pub strict_references: bool,
    /// Reject edges whose overlap is longer than an endpoint's known
    /// sequence length.
    pub check_overlap_lengths: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            strict_references: true,
            check_overlap_lengths: true,
        }
    }
}

impl GraphConfig {
    pub fn with_strict_references(mut self, strict: bool) -> Self {
        self.strict_references = strict;
        self
    }

    pub fn with_overlap_length_check(mut self, check: bool) -> Self {
        self.check_overlap_lengths = check;
        self
    }
}

/// Settings for [`compact`](crate::algorithms::compaction::compact).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactionConfig {
    /// Stop after this many contractions, even if the graph has not
    /// reached its fixpoint.
    pub max_contractions: Option<usize>,
}

impl CompactionConfig {
    pub fn with_max_contractions(mut self, limit: usize) -> Self {
        self.max_contractions = Some(limit);
        self
    }
}
