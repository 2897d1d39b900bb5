//! The assembler pipeline: tokenizer -> label collector -> instruction
//! encoder -> text writer.

pub mod encode;
pub mod error;
pub mod labels;
pub mod tokenize;

use self::error::AssembleError;
use self::labels::{collect_labels, strip_label};
use self::tokenize::tokenize;

/// One line's worth of assembly diagnostics, tagged with the 1-based
/// source line number it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub error: AssembleError,
}

/// The result of assembling a whole source file: the machine-code lines
/// that encoded successfully, in source order, plus any per-line
/// errors. Erroneous lines contribute no output.
#[derive(Debug, Default)]
pub struct AssembleOutput {
    pub machine_code: Vec<String>,
    pub errors: Vec<LineError>,
}

/// Assemble a full source file in two passes: [`labels::collect_labels`]
/// builds the label table, then every non-empty line is stripped,
/// tokenized and encoded against it.
pub fn assemble(source: &str) -> AssembleOutput {
    let labels = collect_labels(source);
    let mut output = AssembleOutput::default();
    let mut pc: u32 = 0;

    for (line_no, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let (_label, rest) = strip_label(line);
        let words = tokenize(rest);
        if words.is_empty() {
            // Label-only line: no instruction to encode, but the slot
            // was already counted by collect_labels.
            pc += 4;
            continue;
        }
        match encode::encode_line(&words, pc, &labels) {
            Ok(word) => output.machine_code.push(encode::to_binary_string(word)),
            Err(error) => output.errors.push(LineError {
                line: line_no + 1,
                error,
            }),
        }
        pc += 4;
    }

    output
}
