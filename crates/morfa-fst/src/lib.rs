//! Finite-state engine seam for the morfa grammar harness.
//!
//! The harness consumes a finite-state engine through the narrow
//! [`FstEngine`] capability: compile rule files and regular expressions
//! into transducers, compose transducers, run lookups and extract paths.
//! Transducer handles stay opaque; the harness never looks inside one.
//!
//! # Architecture
//!
//! - [`symbols`] -- Epsilon marker constant and stripping
//! - [`format`] -- Line-oriented string-pair file parsing
//! - [`table`] -- Reference backend over finite path tables
//!
//! Real grammar compilation (lexc, sfst, twol, regular expressions) is the
//! business of a full engine such as hfst or foma; one is plugged in by
//! implementing [`FstEngine`] over its handles. The bundled
//! [`table::TableEngine`] covers the fixture-driven side of harness work
//! without any grammar compilation at all.

pub mod format;
pub mod symbols;
pub mod table;

use std::path::Path;

/// Error type for engine backends.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A rule file could not be read.
    #[error("could not read rule file: {0}")]
    Io(#[from] std::io::Error),
    /// A pair file line did not parse.
    #[error("pair file line {line}: {reason}")]
    PairSyntax { line: usize, reason: String },
    /// The backend has no compiler for this rule-file kind.
    #[error("{0} rule files are not supported by this backend")]
    UnsupportedFormat(RuleKind),
    /// The backend has no regular-expression compiler.
    #[error("regular expressions are not supported by this backend")]
    UnsupportedRegex,
}

/// Weight attached to a transducer path.
///
/// Opaque to the harness. The reference backend adds weights under
/// composition and otherwise passes them through untouched.
pub type Weight = f32;

/// The rule-file formats a cascade can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Lexicon rules (lexc).
    Lexc,
    /// Replacement rules (sfst).
    Sfst,
    /// Two-level rules (twol).
    Twol,
    /// Literal string-pair lists, one path per line.
    Pairs,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuleKind::Lexc => "lexc",
            RuleKind::Sfst => "sfst",
            RuleKind::Twol => "twol",
            RuleKind::Pairs => "pairs",
        };
        f.write_str(name)
    }
}

/// Capability an external finite-state engine exposes to the harness.
///
/// `Fst` is the engine's compiled-transducer handle. Handles only ever
/// travel back into [`compose`](FstEngine::compose),
/// [`lookup`](FstEngine::lookup) and
/// [`extract_paths`](FstEngine::extract_paths) of the engine that made
/// them.
pub trait FstEngine {
    /// Opaque compiled-transducer handle.
    type Fst;

    /// Compile a lexicon (lexc) rule file.
    fn compile_lexc(&self, path: &Path) -> Result<Self::Fst, EngineError>;

    /// Compile a replacement (sfst) rule file.
    fn compile_sfst(&self, path: &Path) -> Result<Self::Fst, EngineError>;

    /// Compile a two-level (twol) rule file.
    fn compile_twol(&self, path: &Path) -> Result<Self::Fst, EngineError>;

    /// Compile a literal string-pair list.
    fn compile_pairs(&self, path: &Path) -> Result<Self::Fst, EngineError>;

    /// Compile a regular expression. The text arrives with all
    /// symbol-class names already expanded.
    fn compile_regex(&self, regex: &str) -> Result<Self::Fst, EngineError>;

    /// Compose two transducers: the output tape of `first` feeds the
    /// input tape of `second`.
    fn compose(&self, first: &Self::Fst, second: &Self::Fst) -> Self::Fst;

    /// Look up one input string.
    ///
    /// Each result is an output string, possibly still carrying epsilon
    /// markers, with its weight. An empty vector means the input is not
    /// accepted.
    fn lookup(&self, fst: &Self::Fst, input: &str) -> Vec<(String, Weight)>;

    /// Extract every input/output path of the transducer.
    ///
    /// Only meaningful for transducers with finitely many paths. Outputs
    /// are grouped per input string in whatever order the engine yields.
    fn extract_paths(&self, fst: &Self::Fst) -> Vec<(String, Vec<(String, Weight)>)>;

    /// Dispatch to the compiler for `kind`.
    fn compile_rule_file(&self, kind: RuleKind, path: &Path) -> Result<Self::Fst, EngineError> {
        match kind {
            RuleKind::Lexc => self.compile_lexc(path),
            RuleKind::Sfst => self.compile_sfst(path),
            RuleKind::Twol => self.compile_twol(path),
            RuleKind::Pairs => self.compile_pairs(path),
        }
    }
}
