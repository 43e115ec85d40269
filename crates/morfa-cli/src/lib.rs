// morfa-cli: shared utilities for the grammar development tools.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process;

use morfa_fst::RuleKind;
use morfa_fst::table::TableEngine;
use morfa_harness::cascade::Cascade;
use morfa_harness::report::VerifyReport;

/// Environment variable holding rule files as a PATH-like list, used when
/// no `-r` arguments are given.
const RULES_ENV: &str = "MORFA_RULES";

/// Infer the rule format from a file extension.
///
/// Recognized extensions: `.lexc`, `.sfst`, `.twol`, `.pairs`.
pub fn kind_for_path(path: &Path) -> Result<RuleKind, String> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "lexc" => Ok(RuleKind::Lexc),
        "sfst" => Ok(RuleKind::Sfst),
        "twol" => Ok(RuleKind::Twol),
        "pairs" => Ok(RuleKind::Pairs),
        _ => Err(format!(
            "cannot infer rule format of {} (expected .lexc, .sfst, .twol or .pairs)",
            path.display()
        )),
    }
}

/// Compile rule files bottom-up into a cascade.
///
/// Rule file order:
/// 1. `rule_files` arguments (if any)
/// 2. `MORFA_RULES` environment variable (PATH-like list)
pub fn build_cascade(rule_files: &[String]) -> Result<Cascade<TableEngine>, String> {
    let files: Vec<PathBuf> = if rule_files.is_empty() {
        match std::env::var(RULES_ENV) {
            Ok(list) => std::env::split_paths(&list).collect(),
            Err(_) => Vec::new(),
        }
    } else {
        rule_files.iter().map(PathBuf::from).collect()
    };

    if files.is_empty() {
        return Err(format!(
            "no rule files given (pass -r FILE for each rule, or set {RULES_ENV})"
        ));
    }

    let mut cascade = Cascade::new(TableEngine::new());
    for path in &files {
        let kind = kind_for_path(path)?;
        cascade
            .compile_and_push(kind, path)
            .map_err(|e| e.to_string())?;
    }
    Ok(cascade)
}

/// Parse `--rule=FILE`, `--rule FILE` or `-r FILE` arguments.
///
/// Returns `(rule_files, remaining_args)` with rule files in the order
/// they were given.
pub fn parse_rule_files(args: &[String]) -> (Vec<String>, Vec<String>) {
    let mut rule_files = Vec::new();
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--rule=") {
            rule_files.push(val.to_string());
        } else if arg == "--rule" || arg == "-r" {
            if i + 1 < args.len() {
                rule_files.push(args[i + 1].clone());
                skip_next = true;
            } else {
                eprintln!("error: {} requires a value", arg);
                process::exit(1);
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (rule_files, remaining)
}

/// Render a verification report for terminal output.
pub fn render_report(name: &str, report: &VerifyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{name}: checked {} surface forms", report.checked());
    if report.over_count() > 0 {
        let _ = writeln!(out, "overgenerated ({}):", report.over_count());
        for mismatch in report.overgenerated() {
            let _ = writeln!(out, "  {} -> {}", mismatch.surface(), mismatch.analysis());
        }
    }
    if report.under_count() > 0 {
        let _ = writeln!(out, "undergenerated ({}):", report.under_count());
        for mismatch in report.undergenerated() {
            let _ = writeln!(out, "  {} -> {}", mismatch.surface(), mismatch.analysis());
        }
    }
    let _ = writeln!(
        out,
        "errors: {} ({:.1}% of checked forms)",
        report.error_count(),
        report.error_rate() * 100.0
    );
    let _ = writeln!(out, "{}", if report.passed() { "PASSED" } else { "FAILED" });
    out
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn rule_kind_follows_extension() {
        assert!(matches!(
            kind_for_path(Path::new("nouns.lexc")),
            Ok(RuleKind::Lexc)
        ));
        assert!(matches!(
            kind_for_path(Path::new("dir/vowels.twol")),
            Ok(RuleKind::Twol)
        ));
        assert!(kind_for_path(Path::new("grammar.xfst")).is_err());
        assert!(kind_for_path(Path::new("noextension")).is_err());
    }

    #[test]
    fn rule_arguments_are_collected_in_order() {
        let args = strings(&["-r", "a.pairs", "--rule=b.pairs", "fixture.tsv", "--rule", "c.twol"]);
        let (rules, remaining) = parse_rule_files(&args);
        assert_eq!(rules, strings(&["a.pairs", "b.pairs", "c.twol"]));
        assert_eq!(remaining, strings(&["fixture.tsv"]));
    }

    #[test]
    fn report_rendering_has_a_verdict_line() {
        let mut report = VerifyReport::new(2);
        let rendered = render_report("expected.tsv", &report);
        assert!(rendered.contains("checked 2 surface forms"));
        assert!(rendered.ends_with("PASSED\n"));

        report.record_undergeneration("koirat", "koira+N+Pl");
        let rendered = render_report("expected.tsv", &report);
        assert!(rendered.contains("undergenerated (1):"));
        assert!(rendered.contains("  koirat -> koira+N+Pl"));
        assert!(rendered.ends_with("FAILED\n"));
    }
}
