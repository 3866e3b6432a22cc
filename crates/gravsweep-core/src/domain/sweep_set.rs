//! Ordered sweep sets of labelled gravity vectors.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::GravityVector;
use crate::ports::CoreError;

/// One labelled point of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GravityEntry {
    /// Human-readable label, used for progress output only.
    pub label: String,
    /// Gravity written into the simulator configuration for this run.
    pub gravity: GravityVector,
}

impl GravityEntry {
    pub fn new(label: impl Into<String>, gravity: GravityVector) -> Self {
        Self {
            label: label.into(),
            gravity,
        }
    }

    /// Parse a `Label=x,y,z` command-line entry.
    pub fn parse(spec: &str) -> Result<Self, CoreError> {
        let (label, vector) = spec.split_once('=').ok_or_else(|| {
            CoreError::Validation(format!("expected LABEL=x,y,z, got '{spec}'"))
        })?;
        Ok(Self::new(label.trim(), vector.parse()?))
    }
}

/// Ordered mapping from label to gravity vector.
///
/// Labels are unique and non-empty; iteration follows insertion order.
/// A set is built once and never mutated while a sweep runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SweepFile", into = "SweepFile")]
pub struct SweepSet {
    entries: Vec<GravityEntry>,
}

/// On-disk shape of a sweep file.
#[derive(Debug, Serialize, Deserialize)]
struct SweepFile {
    entries: Vec<GravityEntry>,
}

impl TryFrom<SweepFile> for SweepSet {
    type Error = CoreError;

    fn try_from(file: SweepFile) -> Result<Self, Self::Error> {
        Self::new(file.entries)
    }
}

impl From<SweepSet> for SweepFile {
    fn from(set: SweepSet) -> Self {
        Self {
            entries: set.entries,
        }
    }
}

impl SweepSet {
    /// Build a sweep set, rejecting empty or duplicate labels.
    pub fn new(entries: Vec<GravityEntry>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.label.trim().is_empty() {
                return Err(CoreError::Validation(
                    "sweep labels cannot be empty".to_string(),
                ));
            }
            if !seen.insert(entry.label.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate sweep label '{}'",
                    entry.label
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Mars, Jupiter and Moon surface gravity, in that order.
    #[must_use]
    pub fn planetary() -> Self {
        Self {
            entries: vec![
                GravityEntry::new("Mars", GravityVector::new(0.0, 0.0, -3.71)),
                GravityEntry::new("Jupiter", GravityVector::new(0.0, 0.0, -24.79)),
                GravityEntry::new("Moon", GravityVector::new(0.0, 0.0, -1.62)),
            ],
        }
    }

    /// Parse a sweep set from `Label=x,y,z` specs, keeping their order.
    pub fn from_specs<S: AsRef<str>>(specs: &[S]) -> Result<Self, CoreError> {
        let entries = specs
            .iter()
            .map(|s| GravityEntry::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// Parse a JSON sweep file body.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Configuration(format!("invalid sweep file: {e}")))
    }

    /// Load a JSON sweep file from disk.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn entries(&self) -> &[GravityEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GravityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

impl<'a> IntoIterator for &'a SweepSet {
    type Item = &'a GravityEntry;
    type IntoIter = std::slice::Iter<'a, GravityEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
