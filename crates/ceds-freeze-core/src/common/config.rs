//! Run configuration: a JSON document parsed once at process start and
//! validated into an immutable [`FreezeParameters`] value that is passed
//! explicitly into every component that needs it.

use crate::domain::{FreezeError, FreezeResult};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    freeze: FreezeSection,
    ceds: CedsSection,
    dirs: DirsSection,
    #[serde(default)]
    diagnostics: bool,
}

#[derive(Debug, Deserialize)]
struct FreezeSection {
    year: i32,
    #[serde(default)]
    isos: IsoSelection,
    species: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CedsSection {
    year_first: i32,
    year_last: i32,
}

#[derive(Debug, Deserialize)]
struct DirsSection {
    input: PathBuf,
    output: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IsoSelection {
    One(String),
    Many(Vec<String>),
}

impl Default for IsoSelection {
    fn default() -> Self {
        Self::One("all".to_string())
    }
}

/// Region-code filter for freezing eligibility. Codes are compared
/// case-insensitively; the filter is stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsoFilter {
    All,
    Explicit(BTreeSet<String>),
}

impl IsoFilter {
    pub fn accepts(&self, iso: &str) -> bool {
        match self {
            Self::All => true,
            Self::Explicit(codes) => codes.contains(&iso.to_ascii_lowercase()),
        }
    }
}

impl From<IsoSelection> for IsoFilter {
    fn from(selection: IsoSelection) -> Self {
        match selection {
            IsoSelection::One(code) if code.eq_ignore_ascii_case("all") => Self::All,
            IsoSelection::One(code) => Self::Explicit(BTreeSet::from([code.to_ascii_lowercase()])),
            IsoSelection::Many(codes) => Self::Explicit(
                codes
                    .into_iter()
                    .map(|code| code.to_ascii_lowercase())
                    .collect(),
            ),
        }
    }
}

/// Immutable per-run freeze parameters. Constructed once from the
/// configuration document and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreezeParameters {
    pub freeze_year: i32,
    pub freeze_isos: IsoFilter,
    pub freeze_species: Vec<String>,
    pub year_first: i32,
    pub year_last: i32,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub diagnostics: bool,
}

impl FreezeParameters {
    pub fn from_file(path: &Path) -> FreezeResult<Self> {
        let source = fs::read_to_string(path).map_err(|source| {
            FreezeError::configuration(
                "CONFIG.READ",
                format!("failed to read config '{}': {}", path.display(), source),
            )
        })?;
        Self::from_json(&source)
    }

    pub fn from_json(source: &str) -> FreezeResult<Self> {
        let document: ConfigDocument = serde_json::from_str(source).map_err(|source| {
            FreezeError::configuration("CONFIG.PARSE", format!("invalid config JSON: {}", source))
        })?;
        Self::from_document(document)
    }

    fn from_document(document: ConfigDocument) -> FreezeResult<Self> {
        if document.freeze.species.is_empty() {
            return Err(FreezeError::configuration(
                "CONFIG.SPECIES_EMPTY",
                "freeze.species must name at least one species",
            ));
        }

        if document.ceds.year_first > document.ceds.year_last {
            return Err(FreezeError::configuration(
                "CONFIG.YEAR_BOUNDS",
                format!(
                    "ceds.year_first {} is after ceds.year_last {}",
                    document.ceds.year_first, document.ceds.year_last
                ),
            ));
        }

        let freeze_year = document.freeze.year;
        if freeze_year < document.ceds.year_first || freeze_year > document.ceds.year_last {
            return Err(FreezeError::configuration(
                "CONFIG.FREEZE_YEAR_RANGE",
                format!(
                    "freeze year {} lies outside the CEDS year range [{}, {}]",
                    freeze_year, document.ceds.year_first, document.ceds.year_last
                ),
            ));
        }

        Ok(Self {
            freeze_year,
            freeze_isos: document.freeze.isos.into(),
            freeze_species: document.freeze.species,
            year_first: document.ceds.year_first,
            year_last: document.ceds.year_last,
            input_dir: document.dirs.input,
            output_dir: document.dirs.output,
            diagnostics: document.diagnostics,
        })
    }

    /// Years whose values are overwritten by the carry-forward freeze.
    pub fn frozen_years(&self) -> RangeInclusive<i32> {
        self.freeze_year..=self.year_last
    }

    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}
