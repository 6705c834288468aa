pub mod errors;

pub use errors::{FreezeError, FreezeErrorCategory, FreezeResult};

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Pipeline stage a per-species failure was raised in. Carried into the
/// end-of-run summary so a failed species can be diagnosed without
/// re-running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessStage {
    Discovery,
    Load,
    Freeze,
    Reconcile,
    Persist,
    Emissions,
}

impl ProcessStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Load => "load",
            Self::Freeze => "freeze",
            Self::Reconcile => "reconcile",
            Self::Persist => "persist",
            Self::Emissions => "emissions",
        }
    }
}

impl Display for ProcessStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesFailure {
    pub species: String,
    pub stage: ProcessStage,
    pub error: FreezeError,
}

impl SpeciesFailure {
    pub fn new(species: impl Into<String>, stage: ProcessStage, error: FreezeError) -> Self {
        Self {
            species: species.into(),
            stage,
            error,
        }
    }
}

/// Outcome of one engine pass: the outputs that were written and the
/// species that failed. Per-species failures never stop later species, so
/// both lists can be non-empty at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub failures: Vec<SpeciesFailure>,
}

impl RunSummary {
    pub fn record_output(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    pub fn record_failure(&mut self, failure: SpeciesFailure) {
        self.failures.push(failure);
    }

    pub fn failed_species(&self) -> Vec<&str> {
        self.failures
            .iter()
            .map(|failure| failure.species.as_str())
            .collect()
    }

    pub fn merge(&mut self, other: RunSummary) {
        self.written.extend(other.written);
        self.failures.extend(other.failures);
    }
}

#[cfg(test)]
mod tests {
    use super::{FreezeError, ProcessStage, RunSummary, SpeciesFailure};

    #[test]
    fn summary_tracks_outputs_and_failures_independently() {
        let mut summary = RunSummary::default();
        summary.record_output("out/H.BC_total_EFs_extended.csv".into());
        summary.record_failure(SpeciesFailure::new(
            "CO",
            ProcessStage::Discovery,
            FreezeError::file_discovery("DISCOVER.EF_FILE", "no EF file for CO"),
        ));

        assert_eq!(summary.written.len(), 1);
        assert_eq!(summary.failed_species(), vec!["CO"]);
        assert_eq!(summary.failures[0].stage.to_string(), "discovery");
    }

    #[test]
    fn merge_concatenates_both_lists() {
        let mut first = RunSummary::default();
        first.record_output("a.csv".into());
        let mut second = RunSummary::default();
        second.record_output("b.csv".into());
        second.record_failure(SpeciesFailure::new(
            "SO2",
            ProcessStage::Emissions,
            FreezeError::alignment("ALIGN.META_MISMATCH", "mismatch"),
        ));

        first.merge(second);
        assert_eq!(first.written.len(), 2);
        assert_eq!(first.failed_species(), vec!["SO2"]);
    }
}
