// morfa-verify: Check a grammar cascade against expected-analysis fixtures.
//
// Compiles the given rule files bottom-up, runs every fixture through the
// composed grammar and prints overgenerated and undergenerated analyses.
// Exits with code 1 if any fixture fails.
//
// Usage:
//   morfa-verify [-r RULE_FILE]... FIXTURE...
//
// Options:
//   -r, --rule FILE   Rule file to compose (repeatable, order matters)
//   -h, --help        Print help

use std::path::Path;
use std::process;

use morfa_harness::fixture::ExpectedAnalyses;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (rule_files, args) = morfa_cli::parse_rule_files(&args);

    if morfa_cli::wants_help(&args) {
        println!("morfa-verify: Check a grammar cascade against fixtures.");
        println!();
        println!("Usage: morfa-verify [-r RULE_FILE]... FIXTURE...");
        println!();
        println!("Rule files are composed bottom-up in the order given.");
        println!("Each fixture lists one surface form and one expected analysis");
        println!("per line; repeated surface forms accumulate analyses.");
        println!();
        println!("Options:");
        println!("  -r, --rule FILE   Rule file to compose (repeatable, order matters)");
        println!("  -h, --help        Print this help");
        return;
    }

    let fixtures: Vec<String> = args.iter().filter(|a| !a.starts_with('-')).cloned().collect();
    if fixtures.is_empty() {
        morfa_cli::fatal("no fixture file given (see --help)");
    }

    let cascade = morfa_cli::build_cascade(&rule_files).unwrap_or_else(|e| morfa_cli::fatal(&e));

    let mut failed = false;
    for fixture in &fixtures {
        let expected = ExpectedAnalyses::from_path(Path::new(fixture))
            .unwrap_or_else(|e| morfa_cli::fatal(&e.to_string()));
        let report = cascade
            .verify(&expected)
            .unwrap_or_else(|e| morfa_cli::fatal(&e.to_string()));
        print!("{}", morfa_cli::render_report(fixture, &report));
        if !report.passed() {
            failed = true;
        }
    }

    if failed {
        process::exit(1);
    }
}
