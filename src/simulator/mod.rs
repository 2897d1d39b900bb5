//! The simulator pipeline: program loader -> fetch/decode -> per-format
//! executor -> trace recorder -> memory dumper.

pub mod decode;
pub mod error;
pub mod exec;
pub mod loader;
pub mod memory;
pub mod registers;
pub mod trace;

use crate::isa::opcode;

use self::error::LoadError;
use self::memory::DataMemory;
use self::registers::RegisterFile;

/// Owns all per-invocation simulator state: the register file, data
/// memory, the loaded instruction stream, the program counter, and the
/// accumulated trace.
pub struct Simulator {
    registers: RegisterFile,
    memory: DataMemory,
    instructions: Vec<u32>,
    pc: u32,
    trace: Vec<String>,
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            registers: RegisterFile::new(),
            memory: DataMemory::new(),
            instructions: Vec::new(),
            pc: 0,
            trace: Vec::new(),
        }
    }

    /// Parse a machine-code text file into instruction memory. Must be
    /// called before [`Simulator::run`].
    pub fn load_program(&mut self, text: &str) -> Result<(), LoadError> {
        self.instructions = loader::load_program(text)?;
        Ok(())
    }

    /// Run to completion: virtual halt, or the program counter falling
    /// outside instruction memory. Returns the full trace, including
    /// the trailing memory dump.
    pub fn run(&mut self) -> Vec<String> {
        loop {
            let index = (self.pc / 4) as usize;
            let Some(&word) = self.instructions.get(index) else {
                break;
            };

            if decode::is_virtual_halt(word) {
                self.pc = self.pc.wrapping_add(4);
                self.registers.enforce_x0();
                self.retire();
                break;
            }

            self.step(word);
            self.registers.enforce_x0();
            self.retire();
        }

        self.trace.extend(trace::memory_dump(&self.memory));
        std::mem::take(&mut self.trace)
    }

    /// Decode and execute one instruction, updating `self.pc` to the
    /// next fetch address. Unknown opcodes are treated as no-ops: this
    /// cannot occur on output produced by the paired assembler, but the
    /// decoder is defensive about it anyway.
    fn step(&mut self, word: u32) {
        let next_pc = match decode::opcode(word) {
            opcode::OP => {
                exec::exec_r(&mut self.registers, decode::decode_r(word));
                self.pc.wrapping_add(4)
            }
            opcode::OP_IMM => {
                exec::exec_addi(&mut self.registers, decode::decode_i(word));
                self.pc.wrapping_add(4)
            }
            opcode::LOAD => {
                exec::exec_load(&mut self.registers, &self.memory, decode::decode_i(word));
                self.pc.wrapping_add(4)
            }
            opcode::JALR => exec::exec_jalr(&mut self.registers, decode::decode_i(word), self.pc),
            opcode::STORE => {
                exec::exec_store(&self.registers, &mut self.memory, decode::decode_s(word));
                self.pc.wrapping_add(4)
            }
            opcode::BRANCH => exec::exec_branch(&self.registers, decode::decode_b(word), self.pc),
            opcode::JAL => exec::exec_jal(&mut self.registers, decode::decode_j(word), self.pc),
            _ => self.pc.wrapping_add(4),
        };
        self.pc = next_pc;
    }

    fn retire(&mut self) {
        self.trace.push(trace::trace_line(self.pc, &self.registers));
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
