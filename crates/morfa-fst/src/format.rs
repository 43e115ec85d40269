// Line-oriented string-pair parsing for the table backend.
//
// Accepted line shapes, fields split on whitespace:
//
//   input                  identity path (output = input)
//   input output           one path
//   input output weight    weighted path
//
// Blank lines and lines starting with `!` are skipped.

use crate::{EngineError, Weight};

/// One parsed transducer path.
#[derive(Debug, Clone, PartialEq)]
pub struct PairLine {
    pub input: String,
    pub output: String,
    pub weight: Weight,
}

/// Parse the text of a pair file.
///
/// Field counts other than 1, 2 or 3 and unparseable weights are rejected
/// with the 1-based line number.
pub fn parse_pairs(text: &str) -> Result<Vec<PairLine>, EngineError> {
    let mut paths = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('!') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let path = match fields.as_slice() {
            [input] => PairLine {
                input: (*input).to_string(),
                output: (*input).to_string(),
                weight: 0.0,
            },
            [input, output] => PairLine {
                input: (*input).to_string(),
                output: (*output).to_string(),
                weight: 0.0,
            },
            [input, output, weight] => {
                let weight: Weight = weight.parse().map_err(|_| EngineError::PairSyntax {
                    line: idx + 1,
                    reason: format!("invalid weight {weight:?}"),
                })?;
                PairLine {
                    input: (*input).to_string(),
                    output: (*output).to_string(),
                    weight,
                }
            }
            _ => {
                return Err(EngineError::PairSyntax {
                    line: idx + 1,
                    reason: format!("expected 1 to 3 fields, got {}", fields.len()),
                });
            }
        };
        paths.push(path);
    }
    Ok(paths)
}
