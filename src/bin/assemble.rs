use std::fs;
use std::io;

use clap::Parser;
use riscv_mini_toolchain::assembler::assemble;

/// Translate a human-readable assembly source file into a stream of
/// 32-bit machine-code words, one ASCII `0`/`1` string per line.
///
/// Per-line errors (unknown mnemonic, unknown register, undefined
/// label, a misaligned branch, or an out-of-range immediate) are
/// printed to standard error and the offending line is omitted from the
/// output; assembly continues with the remaining lines. A failure to
/// read the input or write the output is a fatal I/O error.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Path to the assembly source file
    input: String,

    /// Path to the machine-code output file
    output: String,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let source = fs::read_to_string(&args.input)?;

    let result = assemble(&source);
    for line_error in &result.errors {
        eprintln!("Error: {} (line {})", line_error.error, line_error.line);
    }

    // Per-line errors are non-fatal (they were already reported above,
    // and the offending lines were simply omitted from the output);
    // only an I/O failure makes this `main` return `Err`.
    fs::write(&args.output, result.machine_code.join("\n"))
}
