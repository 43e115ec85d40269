// Composition cascade over a pluggable finite-state engine.
//
// Grown through compile_and_push, the stack holds cumulative
// compositions: entry i is the grammar after i+1 rule files, so the top
// is always the whole grammar and every earlier stage stays available
// for tracing. Compilation errors leave the stack untouched. push and
// compose_on_top are the manual versions of the same protocol.

use std::path::Path;

use morfa_fst::symbols::strip_epsilons;
use morfa_fst::{FstEngine, RuleKind};

use crate::HarnessError;
use crate::definitions::Definitions;
use crate::fixture::ExpectedAnalyses;
use crate::report::VerifyReport;

/// A grammar under construction: rule transducers composed bottom-up.
pub struct Cascade<E: FstEngine> {
    engine: E,
    definitions: Definitions,
    stack: Vec<E::Fst>,
}

impl<E: FstEngine> Cascade<E> {
    /// Empty cascade with no symbol-class definitions.
    pub fn new(engine: E) -> Self {
        Cascade::with_definitions(engine, Definitions::default())
    }

    /// Empty cascade whose regular expressions expand through `definitions`.
    pub fn with_definitions(engine: E, definitions: Definitions) -> Self {
        Cascade {
            engine,
            definitions,
            stack: Vec::new(),
        }
    }

    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Number of composition stages, one per rule added.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drop all composed stages. Definitions are kept.
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// The full grammar composed so far.
    pub fn top(&self) -> Option<&E::Fst> {
        self.stack.last()
    }

    /// Append a transducer as a new stage without composing it.
    ///
    /// For the first rule of a grammar, or when the new transducer should
    /// not be run through the composition so far.
    pub fn push(&mut self, rule: E::Fst) {
        self.stack.push(rule);
    }

    /// Compose a transducer onto the current grammar and append the
    /// result as the new top stage.
    pub fn compose_on_top(&mut self, rule: E::Fst) -> Result<(), HarnessError> {
        let top = self.stack.last().ok_or(HarnessError::EmptyCascade)?;
        let stage = self.engine.compose(top, &rule);
        self.stack.push(stage);
        Ok(())
    }

    /// Compile a rule file and grow the cascade with it: the first rule
    /// is pushed as-is, every later rule is composed onto the top.
    ///
    /// On failure the cascade is unchanged and the error carries the file
    /// path with the engine's reason.
    pub fn compile_and_push(&mut self, kind: RuleKind, path: &Path) -> Result<(), HarnessError> {
        let rule = self
            .engine
            .compile_rule_file(kind, path)
            .map_err(|err| HarnessError::GrammarMalformed {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;
        match self.stack.last() {
            Some(top) => {
                let stage = self.engine.compose(top, &rule);
                self.stack.push(stage);
            }
            None => self.stack.push(rule),
        }
        Ok(())
    }

    /// Expand symbol-class names in `regex` and compile it. The caller
    /// decides where the result goes ([`Cascade::push`] or
    /// [`Cascade::compose_on_top`]). The error carries the regex as
    /// written, before expansion.
    pub fn compile_regex(&self, regex: &str) -> Result<E::Fst, HarnessError> {
        let expanded = self.definitions.expand(regex);
        self.engine
            .compile_regex(&expanded)
            .map_err(|err| HarnessError::RegexMalformed {
                regex: regex.to_string(),
                reason: err.to_string(),
            })
    }

    /// All analyses of `input` through the full grammar, epsilon markers
    /// removed.
    ///
    /// An input the grammar does not accept is a `PathNotFound`, distinct
    /// from the `EmptyCascade` usage error.
    pub fn lookup(&self, input: &str) -> Result<Vec<String>, HarnessError> {
        let top = self.stack.last().ok_or(HarnessError::EmptyCascade)?;
        let results = self.engine.lookup(top, input);
        if results.is_empty() {
            return Err(HarnessError::PathNotFound {
                surface: input.to_string(),
            });
        }
        Ok(results
            .into_iter()
            .map(|(output, _)| strip_epsilons(&output))
            .collect())
    }

    /// Outputs of `input` at every composition stage, bottom first.
    ///
    /// An empty entry means the path died at that stage, which points at
    /// the rule that removed it. Unlike [`Cascade::lookup`] this does not
    /// error on unaccepted input; dying early is the data.
    pub fn trace(&self, input: &str) -> Result<Vec<Vec<String>>, HarnessError> {
        if self.stack.is_empty() {
            return Err(HarnessError::EmptyCascade);
        }
        Ok(self
            .stack
            .iter()
            .map(|stage| {
                self.engine
                    .lookup(stage, input)
                    .into_iter()
                    .map(|(output, _)| strip_epsilons(&output))
                    .collect()
            })
            .collect())
    }

    /// Every surface form the grammar accepts with its analyses, epsilon
    /// markers removed from both sides. Order is the engine's path order.
    pub fn enumerate_pairs(&self) -> Result<Vec<(String, Vec<String>)>, HarnessError> {
        let top = self.stack.last().ok_or(HarnessError::EmptyCascade)?;
        Ok(self
            .engine
            .extract_paths(top)
            .into_iter()
            .map(|(input, outputs)| {
                let analyses = outputs
                    .into_iter()
                    .map(|(output, _)| strip_epsilons(&output))
                    .collect();
                (strip_epsilons(&input), analyses)
            })
            .collect())
    }

    /// Check the grammar against expected analyses.
    ///
    /// Produced-but-unexpected analyses are recorded as overgeneration,
    /// expected-but-missing ones as undergeneration. A surface form the
    /// grammar rejects outright contributes all its expected analyses to
    /// the undergeneration list. Duplicate produced analyses are counted
    /// once.
    pub fn verify(&self, expected: &ExpectedAnalyses) -> Result<VerifyReport, HarnessError> {
        if self.stack.is_empty() {
            return Err(HarnessError::EmptyCascade);
        }
        let mut report = VerifyReport::new(expected.len());
        for (surface, analyses) in expected.iter() {
            let produced = match self.lookup(surface) {
                Ok(outputs) => dedup_in_order(outputs),
                Err(HarnessError::PathNotFound { .. }) => Vec::new(),
                Err(err) => return Err(err),
            };
            for output in &produced {
                if !analyses.contains(output.as_str()) {
                    report.record_overgeneration(surface, output.clone());
                }
            }
            for analysis in analyses {
                if !produced.iter().any(|output| output == analysis) {
                    report.record_undergeneration(surface, analysis.clone());
                }
            }
        }
        Ok(report)
    }
}

/// Keep the first occurrence of each output, preserving order.
fn dedup_in_order(outputs: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(outputs.len());
    for output in outputs {
        if !seen.contains(&output) {
            seen.push(output);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use morfa_fst::EngineError;
    use morfa_fst::table::{TableEngine, TableFst};

    use super::*;

    fn cascade() -> Cascade<TableEngine> {
        Cascade::new(TableEngine::new())
    }

    // --- empty-cascade guards ---

    #[test]
    fn queries_on_empty_cascade_are_usage_errors() {
        let empty = cascade();
        assert!(matches!(empty.lookup("kala"), Err(HarnessError::EmptyCascade)));
        assert!(matches!(empty.trace("kala"), Err(HarnessError::EmptyCascade)));
        assert!(matches!(
            empty.enumerate_pairs(),
            Err(HarnessError::EmptyCascade)
        ));
        assert!(matches!(
            empty.verify(&ExpectedAnalyses::default()),
            Err(HarnessError::EmptyCascade)
        ));
        assert!(empty.top().is_none());
    }

    // --- composition tests ---

    #[test]
    fn compose_on_top_builds_the_cumulative_grammar() {
        let mut cascade = cascade();
        cascade.push(TableFst::from_pairs([("a", "b")]));
        cascade
            .compose_on_top(TableFst::from_pairs([("b", "c")]))
            .unwrap();
        assert_eq!(cascade.depth(), 2);
        assert_eq!(cascade.lookup("a").unwrap(), vec!["c".to_string()]);
    }

    #[test]
    fn push_appends_without_composing() {
        let mut cascade = cascade();
        cascade.push(TableFst::from_pairs([("a", "b")]));
        cascade.push(TableFst::from_pairs([("b", "c")]));
        assert_eq!(cascade.depth(), 2);
        assert_eq!(cascade.lookup("b").unwrap(), vec!["c".to_string()]);
        assert!(matches!(
            cascade.lookup("a"),
            Err(HarnessError::PathNotFound { .. })
        ));
    }

    #[test]
    fn compose_on_top_requires_a_bottom_stage() {
        let mut cascade = cascade();
        let err = cascade
            .compose_on_top(TableFst::from_pairs([("a", "b")]))
            .unwrap_err();
        assert!(matches!(err, HarnessError::EmptyCascade));
        assert!(cascade.is_empty());
    }

    #[test]
    fn earlier_stages_stay_available() {
        let mut cascade = cascade();
        cascade.push(TableFst::from_pairs([("a", "b")]));
        cascade
            .compose_on_top(TableFst::from_pairs([("b", "c")]))
            .unwrap();
        let stages = cascade.trace("a").unwrap();
        assert_eq!(stages, vec![vec!["b".to_string()], vec!["c".to_string()]]);
    }

    #[test]
    fn trace_shows_where_a_path_dies() {
        let mut cascade = cascade();
        cascade.push(TableFst::from_pairs([("a", "b"), ("x", "y")]));
        cascade
            .compose_on_top(TableFst::from_pairs([("b", "c")]))
            .unwrap();
        let stages = cascade.trace("x").unwrap();
        assert_eq!(stages[0], vec!["y".to_string()]);
        assert!(stages[1].is_empty());
    }

    #[test]
    fn clear_resets_stages_but_keeps_definitions() {
        let defs = Definitions::new([("Vowel", "[a|e]")]);
        let mut cascade = Cascade::with_definitions(TableEngine::new(), defs);
        cascade.push(TableFst::from_pairs([("a", "b")]));
        cascade.clear();
        assert!(cascade.is_empty());
        assert_eq!(cascade.definitions().get("Vowel"), Some("[a|e]"));
    }

    // --- compilation tests ---

    #[test]
    fn failed_compile_leaves_cascade_unchanged() {
        let mut cascade = cascade();
        let err = cascade
            .compile_and_push(RuleKind::Lexc, Path::new("nouns.lexc"))
            .unwrap_err();
        match err {
            HarnessError::GrammarMalformed { path, reason } => {
                assert_eq!(path, Path::new("nouns.lexc"));
                assert!(reason.contains("lexc"));
            }
            other => panic!("expected GrammarMalformed, got {other:?}"),
        }
        assert!(cascade.is_empty());
    }

    #[test]
    fn regex_compile_expands_definitions_first() {
        #[derive(Clone)]
        struct RecordingEngine {
            seen: Rc<RefCell<Vec<String>>>,
        }
        impl FstEngine for RecordingEngine {
            type Fst = ();
            fn compile_lexc(&self, _path: &Path) -> Result<(), EngineError> {
                Err(EngineError::UnsupportedFormat(RuleKind::Lexc))
            }
            fn compile_sfst(&self, _path: &Path) -> Result<(), EngineError> {
                Err(EngineError::UnsupportedFormat(RuleKind::Sfst))
            }
            fn compile_twol(&self, _path: &Path) -> Result<(), EngineError> {
                Err(EngineError::UnsupportedFormat(RuleKind::Twol))
            }
            fn compile_pairs(&self, _path: &Path) -> Result<(), EngineError> {
                Err(EngineError::UnsupportedFormat(RuleKind::Pairs))
            }
            fn compile_regex(&self, regex: &str) -> Result<(), EngineError> {
                self.seen.borrow_mut().push(regex.to_string());
                Ok(())
            }
            fn compose(&self, _first: &(), _second: &()) {}
            fn lookup(&self, _fst: &(), _input: &str) -> Vec<(String, morfa_fst::Weight)> {
                Vec::new()
            }
            fn extract_paths(&self, _fst: &()) -> Vec<(String, Vec<(String, morfa_fst::Weight)>)> {
                Vec::new()
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let engine = RecordingEngine { seen: Rc::clone(&seen) };
        let defs = Definitions::new([("Vowel", "[a|e|i]")]);
        let mut cascade = Cascade::with_definitions(engine, defs);
        let rule = cascade.compile_regex("Vowel+").unwrap();
        cascade.push(rule);
        assert_eq!(*seen.borrow(), vec!["[a|e|i]+".to_string()]);
        assert_eq!(cascade.depth(), 1);
    }

    #[test]
    fn failed_regex_reports_the_unexpanded_form() {
        let defs = Definitions::new([("Vowel", "[a|e|i]")]);
        let cascade = Cascade::with_definitions(TableEngine::new(), defs);
        let err = cascade.compile_regex("Vowel+").unwrap_err();
        match err {
            HarnessError::RegexMalformed { regex, .. } => assert_eq!(regex, "Vowel+"),
            other => panic!("expected RegexMalformed, got {other:?}"),
        }
        assert!(cascade.is_empty());
    }

    // --- lookup tests ---

    #[test]
    fn unaccepted_input_is_path_not_found() {
        let mut cascade = cascade();
        cascade.push(TableFst::from_pairs([("kissa", "kissa+N+Sg")]));
        assert_eq!(
            cascade.lookup("kissa").unwrap(),
            vec!["kissa+N+Sg".to_string()]
        );
        match cascade.lookup("koira").unwrap_err() {
            HarnessError::PathNotFound { surface } => assert_eq!(surface, "koira"),
            other => panic!("expected PathNotFound, got {other:?}"),
        }
    }

    #[test]
    fn lookup_strips_epsilon_markers_from_outputs() {
        use morfa_fst::symbols::EPSILON_SYMBOL;
        let marked = format!("kissa+N{EPSILON_SYMBOL}+Sg");
        let mut cascade = cascade();
        cascade.push(TableFst::from_pairs([("kissa".to_string(), marked)]));
        assert_eq!(
            cascade.lookup("kissa").unwrap(),
            vec!["kissa+N+Sg".to_string()]
        );
    }

    // --- enumeration tests ---

    #[test]
    fn enumerate_pairs_groups_analyses_per_surface_form() {
        let mut cascade = cascade();
        cascade.push(TableFst::from_pairs([
            ("kissa", "kissa+N+Sg"),
            ("kissa", "kissa+N+Nom"),
            ("koira", "koira+N+Sg"),
        ]));
        let pairs = cascade.enumerate_pairs().unwrap();
        assert_eq!(
            pairs,
            vec![
                (
                    "kissa".to_string(),
                    vec!["kissa+N+Sg".to_string(), "kissa+N+Nom".to_string()]
                ),
                ("koira".to_string(), vec!["koira+N+Sg".to_string()]),
            ]
        );
    }

    // --- verification tests ---

    #[test]
    fn verify_splits_over_and_undergeneration() {
        let mut cascade = cascade();
        cascade.push(TableFst::from_pairs([
            ("kissa", "kissa+N+Sg"),
            ("kissa", "kissa+N+Pl"),
        ]));
        let expected: ExpectedAnalyses = [("kissa", "kissa+N+Sg"), ("koirat", "koira+N+Pl")]
            .into_iter()
            .collect();
        let report = cascade.verify(&expected).unwrap();
        assert_eq!(report.checked(), 2);
        assert_eq!(report.over_count(), 1);
        assert_eq!(report.overgenerated()[0].surface(), "kissa");
        assert_eq!(report.overgenerated()[0].analysis(), "kissa+N+Pl");
        assert_eq!(report.under_count(), 1);
        assert_eq!(report.undergenerated()[0].surface(), "koirat");
        assert_eq!(report.undergenerated()[0].analysis(), "koira+N+Pl");
        assert!(!report.passed());
    }

    #[test]
    fn verify_passes_when_grammar_matches_fixture() {
        let mut cascade = cascade();
        cascade.push(TableFst::from_pairs([("kissa", "kissa+N+Sg")]));
        let expected: ExpectedAnalyses = [("kissa", "kissa+N+Sg")].into_iter().collect();
        let report = cascade.verify(&expected).unwrap();
        assert!(report.passed());
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.error_rate(), 0.0);
    }

    #[test]
    fn duplicate_produced_analyses_count_once() {
        let mut cascade = cascade();
        cascade.push(TableFst::from_pairs([
            ("kissa", "kissa+N+Sg"),
            ("kissa", "kissa+N+Sg"),
        ]));
        let expected: ExpectedAnalyses = [("kissa", "kissa+N+Sg")].into_iter().collect();
        let report = cascade.verify(&expected).unwrap();
        assert!(report.passed());
    }
}
