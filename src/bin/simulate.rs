use std::fs;
use std::process::ExitCode;

use clap::Parser;
use riscv_mini_toolchain::simulator::Simulator;

/// Execute a machine-code file against a modeled register file and data
/// memory, producing a per-cycle architectural trace followed by a
/// memory dump.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Path to the machine-code input file
    input: String,

    /// Path to the trace output file
    output: String,
}

fn main() -> ExitCode {
    // A wrong argument count must exit 1 specifically, which takes
    // priority over clap's own usage-error exit code (2).
    if std::env::args().count() != 3 {
        eprintln!("Usage: simulate <input.bin> <output.trace>");
        return ExitCode::FAILURE;
    }

    let args = Args::parse();

    let text = match fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: could not read {}: {e}", args.input);
            return ExitCode::FAILURE;
        }
    };

    let mut simulator = Simulator::new();
    if let Err(e) = simulator.load_program(&text) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let trace = simulator.run();
    if let Err(e) = fs::write(&args.output, trace.join("\n") + "\n") {
        eprintln!("Error: could not write {}: {e}", args.output);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
