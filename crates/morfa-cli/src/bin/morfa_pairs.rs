// morfa-pairs: Dump every surface form a grammar accepts with its analyses.
//
// Prints the full language of the composed grammar, one surface form per
// block with its analyses indented below. Useful for eyeballing small
// grammars and for diffing two versions of a rule file.
//
// Usage:
//   morfa-pairs [-r RULE_FILE]...
//
// Options:
//   -r, --rule FILE   Rule file to compose (repeatable, order matters)
//   -h, --help        Print help

use std::io::{self, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (rule_files, args) = morfa_cli::parse_rule_files(&args);

    if morfa_cli::wants_help(&args) {
        println!("morfa-pairs: Dump every surface form a grammar accepts.");
        println!();
        println!("Usage: morfa-pairs [-r RULE_FILE]...");
        println!();
        println!("Options:");
        println!("  -r, --rule FILE   Rule file to compose (repeatable, order matters)");
        println!("  -h, --help        Print this help");
        return;
    }

    let cascade = morfa_cli::build_cascade(&rule_files).unwrap_or_else(|e| morfa_cli::fatal(&e));
    let pairs = cascade
        .enumerate_pairs()
        .unwrap_or_else(|e| morfa_cli::fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for (surface, analyses) in &pairs {
        let _ = writeln!(out, "{surface}:");
        for analysis in analyses {
            let _ = writeln!(out, "  {analysis}");
        }
    }
}
