//! The instruction-set encoding contract shared by the assembler and the
//! simulator.
//!
//! Everything in this module is read-only, process-lifetime data: the
//! mnemonic tables, the register name map, and the `Format` that each
//! mnemonic decodes to. Both pipelines look up into these tables rather
//! than hard-coding opcodes at their call sites.

use std::fmt;

/// The five instruction formats this ISA subset supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    R,
    I,
    S,
    B,
    J,
}

/// One row of the instruction table: everything needed to encode or
/// decode a mnemonic, aside from its operands.
#[derive(Debug, Clone, Copy)]
pub struct InstrInfo {
    pub format: Format,
    pub opcode: u8,
    pub funct3: u8,
    /// Only meaningful for R-type; zero otherwise.
    pub funct7: u8,
}

macro_rules! instr_table {
    ($($mnem:literal => ($fmt:expr, $opcode:expr, $funct3:expr, $funct7:expr)),* $(,)?) => {
        /// Look up the format/opcode/funct fields for a mnemonic.
        pub fn lookup(mnemonic: &str) -> Option<InstrInfo> {
            match mnemonic {
                $($mnem => Some(InstrInfo {
                    format: $fmt,
                    opcode: $opcode,
                    funct3: $funct3,
                    funct7: $funct7,
                }),)*
                _ => None,
            }
        }
    };
}

// opcode/funct3/funct7 values per the RV32I subset this toolchain
// targets.
instr_table! {
    "add"  => (Format::R, 0b0110011, 0b000, 0b0000000),
    "sub"  => (Format::R, 0b0110011, 0b000, 0b0100000),
    "slt"  => (Format::R, 0b0110011, 0b010, 0b0000000),
    "srl"  => (Format::R, 0b0110011, 0b101, 0b0000000),
    "or"   => (Format::R, 0b0110011, 0b110, 0b0000000),
    "and"  => (Format::R, 0b0110011, 0b111, 0b0000000),
    "lw"   => (Format::I, 0b0000011, 0b010, 0),
    "addi" => (Format::I, 0b0010011, 0b000, 0),
    "jalr" => (Format::I, 0b1100111, 0b000, 0),
    "sw"   => (Format::S, 0b0100011, 0b010, 0),
    "beq"  => (Format::B, 0b1100011, 0b000, 0),
    "bne"  => (Format::B, 0b1100011, 0b001, 0),
    "blt"  => (Format::B, 0b1100011, 0b100, 0),
    "jal"  => (Format::J, 0b1101111, 0, 0),
}

/// Opcode for the branch/jump/R/I/S groups, named for use in the
/// decoder's dispatch match (mirrors the mnemonic table above, but
/// indexed the other way around).
pub mod opcode {
    pub const OP: u8 = 0b0110011;
    pub const LOAD: u8 = 0b0000011;
    pub const OP_IMM: u8 = 0b0010011;
    pub const JALR: u8 = 0b1100111;
    pub const STORE: u8 = 0b0100011;
    pub const BRANCH: u8 = 0b1100011;
    pub const JAL: u8 = 0b1101111;
}

/// Register name to index, including every ABI alias (`zero`, `ra`,
/// `sp`, ..., `s0`/`fp`, ..., `t3..t6`).
pub fn register_index(name: &str) -> Option<u8> {
    let index = match name {
        "zero" => 0,
        "ra" => 1,
        "sp" => 2,
        "gp" => 3,
        "tp" => 4,
        "t0" => 5,
        "t1" => 6,
        "t2" => 7,
        "s0" | "fp" => 8,
        "s1" => 9,
        "a0" => 10,
        "a1" => 11,
        "a2" => 12,
        "a3" => 13,
        "a4" => 14,
        "a5" => 15,
        "a6" => 16,
        "a7" => 17,
        "s2" => 18,
        "s3" => 19,
        "s4" => 20,
        "s5" => 21,
        "s6" => 22,
        "s7" => 23,
        "s8" => 24,
        "s9" => 25,
        "s10" => 26,
        "s11" => 27,
        "t3" => 28,
        "t4" => 29,
        "t5" => 30,
        "t6" => 31,
        _ => return None,
    };
    Some(index)
}

/// The canonical ABI name for a register index, used by diagnostics.
/// Always the shorter of the two spellings where both exist (`s0`, not
/// `fp`).
pub fn register_name(index: u8) -> &'static str {
    const NAMES: [&str; 32] = [
        "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3",
        "a4", "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11",
        "t3", "t4", "t5", "t6",
    ];
    NAMES[index as usize]
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self {
            Format::R => 'R',
            Format::I => 'I',
            Format::S => 'S',
            Format::B => 'B',
            Format::J => 'J',
        };
        write!(f, "{c}")
    }
}
