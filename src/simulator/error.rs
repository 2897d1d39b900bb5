use thiserror::Error;

/// Failures while loading a machine-code text file into instruction
/// memory.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("line {line} is not a 32-character binary string: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("I/O error reading machine-code file: {0}")]
    Io(#[from] std::io::Error),
}
