//! Formats the per-cycle state snapshots and the final memory dump.

use super::memory::DataMemory;
use super::registers::RegisterFile;

/// One line: the post-instruction program counter, then all 32 register
/// values, space-separated, all in unsigned decimal.
pub fn trace_line(pc: u32, registers: &RegisterFile) -> String {
    let mut line = pc.to_string();
    for value in registers.iter() {
        line.push(' ');
        line.push_str(&value.to_string());
    }
    line
}

/// The 32-line memory dump appended after the trace: one
/// `0xAAAAAAAA:V` line per data word, starting at `0x00010000` and
/// incrementing by 4.
pub fn memory_dump(memory: &DataMemory) -> Vec<String> {
    const BASE: u32 = 0x0001_0000;
    memory
        .words()
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let addr = BASE + (index as u32) * 4;
            format!("0x{addr:08X}:{value}")
        })
        .collect()
}
