// Expected-analysis fixtures.
//
// A fixture file lists one surface form and one expected analysis per
// line, whitespace separated. Repeating a surface form accumulates
// analyses for it. Blank lines and lines starting with `!` are skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::HarnessError;

/// Expected analyses keyed by surface form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedAnalyses {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl ExpectedAnalyses {
    pub fn new() -> Self {
        ExpectedAnalyses::default()
    }

    /// Add one expected analysis for a surface form.
    pub fn insert(&mut self, surface: impl Into<String>, analysis: impl Into<String>) {
        self.entries
            .entry(surface.into())
            .or_default()
            .insert(analysis.into());
    }

    /// Parse fixture text. Line numbers in errors are 1-based.
    pub fn parse(text: &str) -> Result<Self, HarnessError> {
        let mut expected = ExpectedAnalyses::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [surface, analysis] => expected.insert(*surface, *analysis),
                _ => {
                    return Err(HarnessError::FixtureLine {
                        line: idx + 1,
                        found: fields.len(),
                    });
                }
            }
        }
        Ok(expected)
    }

    /// Read and parse a fixture file.
    pub fn from_path(path: &Path) -> Result<Self, HarnessError> {
        let text = std::fs::read_to_string(path).map_err(|source| HarnessError::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Expected analyses for one surface form.
    pub fn get(&self, surface: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(surface)
    }

    /// Surface forms with their analyses, sorted by surface form.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries
            .iter()
            .map(|(surface, analyses)| (surface.as_str(), analyses))
    }

    /// Number of distinct surface forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for ExpectedAnalyses {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut expected = ExpectedAnalyses::default();
        for (surface, analysis) in iter {
            expected.insert(surface, analysis);
        }
        expected
    }
}
