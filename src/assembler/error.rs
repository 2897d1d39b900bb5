use thiserror::Error;

/// A per-line assembly failure. These are recoverable: the driver
/// records one against its source line and keeps assembling the rest
/// of the file.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum AssembleError {
    #[error("Unknown instruction '{0}'")]
    UnknownMnemonic(String),

    #[error("Unknown register '{0}'")]
    UnknownRegister(String),

    #[error("Undefined label '{0}'")]
    UndefinedLabel(String),

    #[error("missing operand for '{mnemonic}': expected {expected}, found {found}")]
    MissingOperand {
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("immediate {value} does not fit in {bits} bits")]
    ImmediateOutOfRange { value: i64, bits: u32 },

    #[error("invalid immediate '{0}'")]
    InvalidImmediate(String),

    #[error("branch offset {0} is not even")]
    MisalignedBranch(i64),
}
