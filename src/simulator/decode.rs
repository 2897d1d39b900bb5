//! Field extraction from a 32-bit instruction word. Each decode
//! function produces a plain struct of already-sign-extended operands,
//! pulled out with [`crate::bits::extract_field`] rather than string
//! slicing.

use crate::bits::{extract_field, sign_extend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RType {
    pub rd: u8,
    pub rs1: u8,
    pub rs2: u8,
    pub funct3: u8,
    pub funct7: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IType {
    pub rd: u8,
    pub rs1: u8,
    pub funct3: u8,
    pub imm: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SType {
    pub rs1: u8,
    pub rs2: u8,
    pub funct3: u8,
    pub imm: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BType {
    pub rs1: u8,
    pub rs2: u8,
    pub funct3: u8,
    pub imm: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JType {
    pub rd: u8,
    pub imm: i32,
}

pub fn opcode(word: u32) -> u8 {
    extract_field(word, 6, 0) as u8
}

fn rd(word: u32) -> u8 {
    extract_field(word, 11, 7) as u8
}

fn rs1(word: u32) -> u8 {
    extract_field(word, 19, 15) as u8
}

fn rs2(word: u32) -> u8 {
    extract_field(word, 24, 20) as u8
}

fn funct3(word: u32) -> u8 {
    extract_field(word, 14, 12) as u8
}

fn funct7(word: u32) -> u8 {
    extract_field(word, 31, 25) as u8
}

pub fn decode_r(word: u32) -> RType {
    RType {
        rd: rd(word),
        rs1: rs1(word),
        rs2: rs2(word),
        funct3: funct3(word),
        funct7: funct7(word),
    }
}

pub fn decode_i(word: u32) -> IType {
    let imm = extract_field(word, 31, 20);
    IType {
        rd: rd(word),
        rs1: rs1(word),
        funct3: funct3(word),
        imm: sign_extend(imm, 12),
    }
}

pub fn decode_s(word: u32) -> SType {
    let imm11_5 = extract_field(word, 31, 25);
    let imm4_0 = extract_field(word, 11, 7);
    let imm = (imm11_5 << 5) | imm4_0;
    SType {
        rs1: rs1(word),
        rs2: rs2(word),
        funct3: funct3(word),
        imm: sign_extend(imm, 12),
    }
}

pub fn decode_b(word: u32) -> BType {
    let imm12 = extract_field(word, 31, 31);
    let imm10_5 = extract_field(word, 30, 25);
    let imm4_1 = extract_field(word, 11, 8);
    let imm11 = extract_field(word, 7, 7);
    let imm = (imm12 << 12) | (imm11 << 11) | (imm10_5 << 5) | (imm4_1 << 1);
    BType {
        rs1: rs1(word),
        rs2: rs2(word),
        funct3: funct3(word),
        imm: sign_extend(imm, 13),
    }
}

pub fn decode_j(word: u32) -> JType {
    let imm20 = extract_field(word, 31, 31);
    let imm10_1 = extract_field(word, 30, 21);
    let imm11 = extract_field(word, 20, 20);
    let imm19_12 = extract_field(word, 19, 12);
    let imm = (imm20 << 20) | (imm19_12 << 12) | (imm11 << 11) | (imm10_1 << 1);
    JType {
        rd: rd(word),
        imm: sign_extend(imm, 21),
    }
}

/// The canonical virtual-halt sentinel is `beq x0, x0, 0`: opcode
/// BRANCH, funct3 000 (beq), rs1 = rs2 = 0, and a zero branch offset.
pub fn is_virtual_halt(word: u32) -> bool {
    if opcode(word) != crate::isa::opcode::BRANCH {
        return false;
    }
    let b = decode_b(word);
    b.funct3 == 0b000 && b.rs1 == 0 && b.rs2 == 0 && b.imm == 0
}
