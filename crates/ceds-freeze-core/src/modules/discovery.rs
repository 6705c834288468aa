//! Filename conventions: locating a species' EF or activity file in a
//! directory, and naming the emissions output.
//!
//! CEDS intermediate files embed the species code in the file name
//! (e.g. `H.BC_total_EFs_extended.csv`); the leading tag varies between
//! CEDS versions, so discovery matches on the species-bearing suffix.

use crate::domain::{FreezeError, FreezeResult};
use globset::{Glob, GlobMatcher};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    EmissionFactors,
    Activity,
}

impl FileKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmissionFactors => "ef",
            Self::Activity => "activity",
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Self::EmissionFactors => "total_EFs_extended",
            Self::Activity => "total_activity_extended",
        }
    }

    const fn not_found_placeholder(self) -> &'static str {
        match self {
            Self::EmissionFactors => "DISCOVER.EF_FILE",
            Self::Activity => "DISCOVER.ACTIVITY_FILE",
        }
    }
}

impl Display for FileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Find the unique file for a species and kind. When several candidates
/// match, the lexicographically first is taken so discovery stays
/// deterministic across platforms.
pub fn discover_species_file(
    dir: &Path,
    species: &str,
    kind: FileKind,
) -> FreezeResult<PathBuf> {
    let matcher = species_matcher(species, kind)?;

    let entries = std::fs::read_dir(dir).map_err(|source| {
        FreezeError::io_system(
            "IO.DIR_READ",
            format!("failed to read directory '{}': {}", dir.display(), source),
        )
    })?;

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| {
            FreezeError::io_system(
                "IO.DIR_READ",
                format!("failed to read directory '{}': {}", dir.display(), source),
            )
        })?;
        let path = entry.path();
        if path.is_file()
            && path
                .file_name()
                .map(|name| matcher.is_match(name))
                .unwrap_or(false)
        {
            candidates.push(path);
        }
    }

    candidates.sort();
    candidates.into_iter().next().ok_or_else(|| {
        FreezeError::file_discovery(
            kind.not_found_placeholder(),
            format!(
                "no {} file for species '{}' in '{}'",
                kind,
                species,
                dir.display()
            ),
        )
    })
}

pub fn emissions_output_name(species: &str) -> String {
    format!("{}_total_CEDS_emissions.csv", species)
}

fn species_matcher(species: &str, kind: FileKind) -> FreezeResult<GlobMatcher> {
    let pattern = format!("*{}_{}.csv", species, kind.suffix());
    Ok(Glob::new(&pattern)
        .map_err(|source| {
            FreezeError::internal(
                "INTERNAL.DISCOVERY_PATTERN",
                format!("invalid discovery pattern '{}': {}", pattern, source),
            )
        })?
        .compile_matcher())
}
