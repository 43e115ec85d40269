// morfa-lookup: Run surface forms through a grammar cascade.
//
// Prints every analysis the composed grammar produces for each word.
// With --trace, also prints the output of every composition stage so a
// missing analysis can be pinned on the rule that removed it.
//
// Usage:
//   morfa-lookup [-r RULE_FILE]... [--trace] [WORD...]
//
// Options:
//   -r, --rule FILE   Rule file to compose (repeatable, order matters)
//   -t, --trace       Show intermediate outputs per composition stage
//   -h, --help        Print help

use std::io::{self, BufRead, Write};

use morfa_fst::table::TableEngine;
use morfa_harness::HarnessError;
use morfa_harness::cascade::Cascade;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (rule_files, args) = morfa_cli::parse_rule_files(&args);

    if morfa_cli::wants_help(&args) {
        println!("morfa-lookup: Run surface forms through a grammar cascade.");
        println!();
        println!("Usage: morfa-lookup [-r RULE_FILE]... [--trace] [WORD...]");
        println!();
        println!("If WORD arguments are given, looks up each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -r, --rule FILE   Rule file to compose (repeatable, order matters)");
        println!("  -t, --trace       Show intermediate outputs per composition stage");
        println!("  -h, --help        Print this help");
        return;
    }

    let trace = args.iter().any(|a| a == "--trace" || a == "-t");
    let words: Vec<String> = args.iter().filter(|a| !a.starts_with('-')).cloned().collect();

    let cascade = morfa_cli::build_cascade(&rule_files).unwrap_or_else(|e| morfa_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let lookup_word = |word: &str,
                       cascade: &Cascade<TableEngine>,
                       out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        if trace {
            match cascade.trace(word) {
                Ok(stages) => {
                    let _ = writeln!(out, "{word}:");
                    for (i, outputs) in stages.iter().enumerate() {
                        if outputs.is_empty() {
                            let _ = writeln!(out, "  [{i}] (no path)");
                        } else {
                            let _ = writeln!(out, "  [{i}] {}", outputs.join(" | "));
                        }
                    }
                }
                Err(e) => morfa_cli::fatal(&e.to_string()),
            }
            return;
        }
        match cascade.lookup(word) {
            Ok(analyses) => {
                let _ = writeln!(out, "{word}:");
                for analysis in &analyses {
                    let _ = writeln!(out, "  {analysis}");
                }
            }
            Err(HarnessError::PathNotFound { .. }) => {
                let _ = writeln!(out, "{word}: (no analysis)");
            }
            Err(e) => morfa_cli::fatal(&e.to_string()),
        }
    };

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            lookup_word(word, &cascade, &mut out);
        }
    } else {
        for word in &words {
            lookup_word(word, &cascade, &mut out);
        }
    }
}
