// Finite path-table backend.
//
// A TableFst is nothing but the finite list of its input/output paths,
// which is enough for fixture-driven harness work: composition is the
// path join, lookup is an index probe, extraction is the list itself.
// Grammar compilation is deliberately absent; lexc, sfst and twol files
// need a full engine behind the same trait.

use std::path::Path;

use hashbrown::HashMap;

use crate::format::{PairLine, parse_pairs};
use crate::symbols::strip_epsilons;
use crate::{EngineError, FstEngine, RuleKind, Weight};

/// One stored path.
#[derive(Debug, Clone, PartialEq)]
struct TablePath {
    input: String,
    output: String,
    weight: Weight,
}

/// A finite transducer stored as its full path list.
///
/// Inputs are indexed with epsilon markers ignored, so a path list dumped
/// from an engine that prints markers keeps matching plain surface forms.
/// Outputs are returned exactly as stored; stripping them is the
/// caller's side of the contract.
#[derive(Debug, Clone, Default)]
pub struct TableFst {
    paths: Vec<TablePath>,
    /// Epsilon-stripped input string to indices into `paths`, file order.
    index: HashMap<String, Vec<usize>>,
}

impl TableFst {
    /// Build from (input, output) pairs with zero weight.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::from_weighted(pairs.into_iter().map(|(input, output)| (input, output, 0.0)))
    }

    /// Build from (input, output, weight) triples.
    pub fn from_weighted<I, S, T>(paths: I) -> Self
    where
        I: IntoIterator<Item = (S, T, Weight)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut fst = TableFst::default();
        for (input, output, weight) in paths {
            fst.push_path(input.into(), output.into(), weight);
        }
        fst
    }

    fn from_lines(lines: Vec<PairLine>) -> Self {
        let mut fst = TableFst::default();
        for line in lines {
            fst.push_path(line.input, line.output, line.weight);
        }
        fst
    }

    fn push_path(&mut self, input: String, output: String, weight: Weight) {
        let key = strip_epsilons(&input);
        self.index.entry(key).or_default().push(self.paths.len());
        self.paths.push(TablePath {
            input,
            output,
            weight,
        });
    }

    /// Number of stored paths.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// True when the transducer accepts nothing.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// The bundled reference engine over [`TableFst`] path tables.
///
/// `compile_pairs` loads a pair file; the grammar-compiling entry points
/// report [`EngineError::UnsupportedFormat`] and
/// [`EngineError::UnsupportedRegex`]. Composition joins paths whose
/// intermediate strings match after epsilon removal and adds their
/// weights, which is exact for the finite machines this backend stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableEngine;

impl TableEngine {
    pub fn new() -> Self {
        TableEngine
    }
}

impl FstEngine for TableEngine {
    type Fst = TableFst;

    fn compile_lexc(&self, _path: &Path) -> Result<TableFst, EngineError> {
        Err(EngineError::UnsupportedFormat(RuleKind::Lexc))
    }

    fn compile_sfst(&self, _path: &Path) -> Result<TableFst, EngineError> {
        Err(EngineError::UnsupportedFormat(RuleKind::Sfst))
    }

    fn compile_twol(&self, _path: &Path) -> Result<TableFst, EngineError> {
        Err(EngineError::UnsupportedFormat(RuleKind::Twol))
    }

    fn compile_pairs(&self, path: &Path) -> Result<TableFst, EngineError> {
        let text = std::fs::read_to_string(path)?;
        Ok(TableFst::from_lines(parse_pairs(&text)?))
    }

    fn compile_regex(&self, _regex: &str) -> Result<TableFst, EngineError> {
        Err(EngineError::UnsupportedRegex)
    }

    fn compose(&self, first: &TableFst, second: &TableFst) -> TableFst {
        let mut composed = TableFst::default();
        for upper in &first.paths {
            let link = strip_epsilons(&upper.output);
            let Some(indices) = second.index.get(&link) else {
                continue;
            };
            for &i in indices {
                let lower = &second.paths[i];
                composed.push_path(
                    upper.input.clone(),
                    lower.output.clone(),
                    upper.weight + lower.weight,
                );
            }
        }
        composed
    }

    fn lookup(&self, fst: &TableFst, input: &str) -> Vec<(String, Weight)> {
        match fst.index.get(input) {
            Some(indices) => indices
                .iter()
                .map(|&i| (fst.paths[i].output.clone(), fst.paths[i].weight))
                .collect(),
            None => Vec::new(),
        }
    }

    fn extract_paths(&self, fst: &TableFst) -> Vec<(String, Vec<(String, Weight)>)> {
        let mut order: Vec<String> = Vec::new();
        let mut grouped: HashMap<String, Vec<(String, Weight)>> = HashMap::new();
        for path in &fst.paths {
            let key = strip_epsilons(&path.input);
            let outputs = grouped.entry(key.clone()).or_default();
            if outputs.is_empty() {
                order.push(key);
            }
            outputs.push((path.output.clone(), path.weight));
        }
        order
            .into_iter()
            .map(|key| {
                let outputs = grouped.remove(&key).unwrap_or_default();
                (key, outputs)
            })
            .collect()
    }
}
