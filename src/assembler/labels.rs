//! Pass 1: walk the source once to build an immutable label table before
//! any encoding happens, so pass 2 can resolve forward references
//! without shared mutable state.

use std::collections::HashMap;

/// Split a label prefix (`label:`) off the front of a line, if present.
/// Returns the remainder of the line (trimmed) either way.
///
/// A line with no `:` returns the whole line as the remainder and `None`
/// for the label.
pub fn strip_label(line: &str) -> (Option<&str>, &str) {
    match line.split_once(':') {
        Some((label, rest)) => (Some(label.trim()), rest.trim()),
        None => (None, line),
    }
}

/// Byte address -> label table, plus the byte length of the source
/// (number of non-empty lines * 4), which pass 2 reuses as its starting
/// program counter bound.
pub fn collect_labels(source: &str) -> HashMap<String, u32> {
    let mut labels = HashMap::new();
    let mut pc: u32 = 0;
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (label, _rest) = strip_label(line);
        if let Some(label) = label {
            labels.insert(label.to_string(), pc);
        }
        // A label-only line still consumes an instruction slot: pc
        // advances unconditionally for every non-empty line.
        pc += 4;
    }
    labels
}
