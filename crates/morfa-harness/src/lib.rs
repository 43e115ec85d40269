//! Grammar development harness for finite-state morphologies.
//!
//! A grammar is built as a cascade of rule transducers: a lexicon at the
//! bottom, alternation rules composed on top, one at a time. The harness
//! keeps every cumulative composition, so a surface form can be traced
//! stage by stage when a rule eats an analysis it should not have.
//! Against a fixture of expected analyses, [`cascade::Cascade::verify`]
//! splits the differences into overgeneration and undergeneration.
//!
//! The engine underneath is pluggable: anything implementing
//! [`morfa_fst::FstEngine`] can back a cascade, and the bundled path-table
//! backend ([`morfa_fst::table::TableEngine`]) covers fixture-driven work
//! without an external toolkit.
//!
//! # Architecture
//!
//! - [`definitions`] -- Named symbol classes substituted into regular expressions
//! - [`cascade`] -- The composition cascade and its query operations
//! - [`fixture`] -- Expected-analysis fixture files
//! - [`report`] -- Verification results with per-word mismatch detail

pub mod cascade;
pub mod definitions;
pub mod fixture;
pub mod report;

use std::path::PathBuf;

/// Error type for harness operations.
///
/// `GrammarMalformed` and `RegexMalformed` mean a rule source was rejected
/// and the build cannot continue. `EmptyCascade` is a usage error: a query
/// ran before any rule was composed. `PathNotFound` is a per-word outcome;
/// verification records it as undergeneration instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("rule file {} could not be compiled: {}", .path.display(), .reason)]
    GrammarMalformed { path: PathBuf, reason: String },
    #[error("regular expression {regex:?} could not be compiled: {reason}")]
    RegexMalformed { regex: String, reason: String },
    #[error("no transducer has been composed onto the cascade")]
    EmptyCascade,
    #[error("no analysis path found for {surface:?}")]
    PathNotFound { surface: String },
    #[error("could not read fixture file {}: {}", .path.display(), .source)]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("fixture line {line}: expected surface form and analysis, got {found} fields")]
    FixtureLine { line: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_malformed_names_the_file() {
        let err = HarnessError::GrammarMalformed {
            path: PathBuf::from("nouns.lexc"),
            reason: "unsupported rule format: lexc".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("nouns.lexc"));
        assert!(message.contains("unsupported rule format"));
    }

    #[test]
    fn path_not_found_quotes_the_surface_form() {
        let err = HarnessError::PathNotFound {
            surface: "koira".to_string(),
        };
        assert_eq!(err.to_string(), "no analysis path found for \"koira\"");
    }

    #[test]
    fn fixture_line_reports_position_and_width() {
        let err = HarnessError::FixtureLine { line: 4, found: 3 };
        assert_eq!(
            err.to_string(),
            "fixture line 4: expected surface form and analysis, got 3 fields"
        );
    }
}
