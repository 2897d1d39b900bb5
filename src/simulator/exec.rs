//! Per-format executors. Each function applies one retired instruction's
//! effects to the register file (and, for loads/stores, data memory),
//! and returns the instruction's contribution to the next program
//! counter when it isn't the default `pc + 4`.
//!
//! Arithmetic wraps modulo 2^32; `slt`/`blt` compare as signed 32-bit
//! values; `srl` shifts unsigned by `rs2 & 0x1F` bits.

use super::decode::{BType, IType, JType, RType, SType};
use super::memory::DataMemory;
use super::registers::RegisterFile;

/// add/sub/slt/srl/or/and, selected by (funct3, funct7).
pub fn exec_r(regs: &mut RegisterFile, r: RType) {
    let a = regs.get(r.rs1);
    let b = regs.get(r.rs2);
    let result = match (r.funct3, r.funct7) {
        (0b000, 0b0000000) => a.wrapping_add(b),
        (0b000, 0b0100000) => a.wrapping_sub(b),
        (0b010, _) => ((a as i32) < (b as i32)) as u32,
        (0b101, _) => a >> (b & 0x1F),
        (0b110, _) => a | b,
        (0b111, _) => a & b,
        _ => 0,
    };
    regs.set(r.rd, result);
}

/// addi
pub fn exec_addi(regs: &mut RegisterFile, i: IType) {
    let a = regs.get(i.rs1);
    regs.set(i.rd, a.wrapping_add(i.imm as u32));
}

/// lw
pub fn exec_load(regs: &mut RegisterFile, mem: &DataMemory, i: IType) {
    let addr = regs.get(i.rs1).wrapping_add(i.imm as u32);
    regs.set(i.rd, mem.load(addr));
}

/// sw
pub fn exec_store(regs: &RegisterFile, mem: &mut DataMemory, s: SType) {
    let addr = regs.get(s.rs1).wrapping_add(s.imm as u32);
    mem.store(addr, regs.get(s.rs2));
}

/// jalr. Returns the next program counter.
pub fn exec_jalr(regs: &mut RegisterFile, i: IType, pc: u32) -> u32 {
    regs.set(i.rd, pc.wrapping_add(4));
    let target = regs.get(i.rs1).wrapping_add(i.imm as u32);
    target & !1
}

/// jal. Returns the next program counter.
pub fn exec_jal(regs: &mut RegisterFile, j: JType, pc: u32) -> u32 {
    regs.set(j.rd, pc.wrapping_add(4));
    (pc as i64 + j.imm as i64) as u32
}

/// beq/bne/blt, selected by funct3. Returns the next program counter.
pub fn exec_branch(regs: &RegisterFile, b: BType, pc: u32) -> u32 {
    let a = regs.get(b.rs1);
    let b_val = regs.get(b.rs2);
    let taken = match b.funct3 {
        0b000 => a == b_val,
        0b001 => a != b_val,
        0b100 => (a as i32) < (b_val as i32),
        _ => false,
    };
    if taken {
        (pc as i64 + b.imm as i64) as u32
    } else {
        pc.wrapping_add(4)
    }
}
