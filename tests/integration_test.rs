use std::fs;
use std::process::Command;

use riscv_mini_toolchain::assembler::assemble;
use riscv_mini_toolchain::simulator::Simulator;

fn assemble_ok(source: &str) -> Vec<String> {
    let out = assemble(source);
    assert!(out.errors.is_empty(), "unexpected errors: {:?}", out.errors);
    out.machine_code
}

fn run_program(source: &str) -> Vec<String> {
    let machine_code = assemble_ok(source);
    let mut sim = Simulator::new();
    sim.load_program(&machine_code.join("\n")).unwrap();
    sim.run()
}

#[test]
fn arithmetic_and_register_file_round_trip() {
    let source = "addi t0, zero, 10\n\
                  addi t1, zero, 32\n\
                  add t2, t0, t1\n\
                  sub t3, t1, t0\n\
                  beq zero, zero, 0\n";
    let trace = run_program(source);
    // four instructions retire before the halt, then 32 memory-dump lines
    assert_eq!(trace.len(), 5 + 32);
    let halt_line = &trace[4];
    let fields: Vec<&str> = halt_line.split(' ').collect();
    assert_eq!(fields[1 + 5], "10"); // t0 = x5
    assert_eq!(fields[1 + 6], "32"); // t1 = x6
    assert_eq!(fields[1 + 7], "42"); // t2 = x7
    assert_eq!(fields[1 + 28], "22"); // t3 = x28
}

#[test]
fn store_then_load_round_trips_through_data_memory() {
    let source = "addi t0, zero, 99\n\
                  sw t0, 8(zero)\n\
                  lw t1, 8(zero)\n\
                  beq zero, zero, 0\n";
    let trace = run_program(source);
    let halt_line = &trace[3];
    let fields: Vec<&str> = halt_line.split(' ').collect();
    assert_eq!(fields[1 + 6], "99"); // t1
    assert_eq!(trace[4], "0x00010000:0");
    assert_eq!(trace[6], "0x00010008:99");
}

#[test]
fn backward_branch_loop_terminates_on_condition_change() {
    // Counts t0 down from 3 to 0, looping on bne.
    let source = "addi t0, zero, 3\n\
                  L: addi t0, t0, -1\n\
                  bne t0, zero, L\n\
                  beq zero, zero, 0\n";
    let trace = run_program(source);
    // 3 decrements, one taken-branch retire each, then the final
    // not-taken branch, then the halt.
    let halt_line = trace.iter().find(|line| line.starts_with("16 ")).unwrap();
    let fields: Vec<&str> = halt_line.split(' ').collect();
    assert_eq!(fields[1 + 5], "0"); // t0
}

#[test]
fn jal_and_jalr_update_the_link_register() {
    let source = "jal ra, L\n\
                  addi t0, zero, 1\n\
                  L: addi t1, zero, 2\n\
                  jalr zero, ra, 0\n";
    let trace = run_program(source);
    let first_line = &trace[0];
    let fields: Vec<&str> = first_line.split(' ').collect();
    // ra (x1) holds the address of the instruction after the jal.
    assert_eq!(fields[1 + 1], "4");
}

#[test]
fn assembler_skips_bad_lines_but_keeps_assembling_the_rest() {
    let source = "addi t0, zero, 1\n\
                  mul a0, a1, a2\n\
                  addi t1, zero, 2\n";
    let out = assemble(source);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].line, 2);
    assert_eq!(out.machine_code.len(), 2);
}

#[test]
fn undefined_branch_label_is_reported_with_its_source_line() {
    let source = "addi t0, zero, 1\nbeq t0, t0, NOWHERE\n";
    let out = assemble(source);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].line, 2);
}

#[test]
fn simulator_rejects_a_machine_code_file_with_a_malformed_line() {
    let mut sim = Simulator::new();
    let result = sim.load_program("000\n");
    assert!(result.is_err());
}

#[test]
fn falling_off_the_end_of_the_program_still_produces_the_full_memory_dump() {
    let trace = run_program("addi t0, zero, 7\naddi t1, zero, 8\n");
    assert_eq!(trace.len(), 2 + 32);
    assert_eq!(trace.last().unwrap(), "0x0001007C:0");
}

#[test]
fn assemble_binary_always_exits_success_even_with_bad_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.asm");
    let output = dir.path().join("out.bin");
    fs::write(&input, "addi t0, zero, 1\nmul a0, a1, a2\n").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_assemble"))
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();

    assert!(status.success());
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 1);
}

#[test]
fn simulate_binary_writes_a_trace_file_for_a_halting_program() {
    let dir = tempfile::tempdir().unwrap();
    let asm_input = dir.path().join("in.asm");
    let machine_code = dir.path().join("in.bin");
    let trace_output = dir.path().join("out.trace");
    fs::write(&asm_input, "addi t0, zero, 1\nbeq zero, zero, 0\n").unwrap();

    let assemble_status = Command::new(env!("CARGO_BIN_EXE_assemble"))
        .arg(&asm_input)
        .arg(&machine_code)
        .status()
        .unwrap();
    assert!(assemble_status.success());

    let simulate_status = Command::new(env!("CARGO_BIN_EXE_simulate"))
        .arg(&machine_code)
        .arg(&trace_output)
        .status()
        .unwrap();
    assert!(simulate_status.success());

    let trace = fs::read_to_string(&trace_output).unwrap();
    let lines: Vec<&str> = trace.lines().collect();
    assert_eq!(lines.len(), 2 + 32);
    assert_eq!(lines.last().unwrap(), &"0x0001007C:0");
}

#[test]
fn simulate_binary_exits_1_on_wrong_argument_count() {
    let status = Command::new(env!("CARGO_BIN_EXE_simulate"))
        .arg("only-one-argument")
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}
