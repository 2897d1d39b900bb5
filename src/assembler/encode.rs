//! Pass 2: encode one already-tokenized, label-stripped source line into
//! a 32-bit instruction word.
//!
//! Each per-format encoder builds the word with shifts on a `u32`; the
//! 32-character `0`/`1` text form is produced once, at the end, by
//! [`to_binary_string`].

use std::collections::HashMap;

use crate::bits::{extract_field, mask};
use crate::isa::{self, Format, InstrInfo};

use super::error::AssembleError;

/// Render an encoded word as 32 ASCII `0`/`1` characters, MSB first.
pub fn to_binary_string(word: u32) -> String {
    format!("{word:032b}")
}

fn reg(name: &str) -> Result<u32, AssembleError> {
    isa::register_index(name)
        .map(u32::from)
        .ok_or_else(|| AssembleError::UnknownRegister(name.to_string()))
}

fn require_operands(
    mnemonic: &str,
    words: &[String],
    expected: usize,
) -> Result<(), AssembleError> {
    if words.len() < expected {
        return Err(AssembleError::MissingOperand {
            mnemonic: mnemonic.to_string(),
            expected: expected - 1,
            found: words.len().saturating_sub(1),
        });
    }
    Ok(())
}

fn parse_imm(token: &str) -> Result<i64, AssembleError> {
    token
        .parse::<i64>()
        .map_err(|_| AssembleError::InvalidImmediate(token.to_string()))
}

/// Resolve a branch/jump target: a known label wins over parsing the
/// token as a literal decimal offset.
fn resolve_branch_offset(
    token: &str,
    pc: u32,
    labels: &HashMap<String, u32>,
) -> Result<i64, AssembleError> {
    if let Some(&target) = labels.get(token) {
        Ok(i64::from(target) - i64::from(pc))
    } else {
        token
            .parse::<i64>()
            .map_err(|_| AssembleError::UndefinedLabel(token.to_string()))
    }
}

fn imm_fits(value: i64, bits: u32) -> bool {
    let lo = -(1i64 << (bits - 1));
    let hi = (1i64 << (bits - 1)) - 1;
    (lo..=hi).contains(&value)
}

fn checked_imm_field(value: i64, bits: u32) -> Result<u32, AssembleError> {
    if !imm_fits(value, bits) {
        return Err(AssembleError::ImmediateOutOfRange { value, bits });
    }
    Ok((value as u32) & mask(bits))
}

fn encode_r(info: &InstrInfo, words: &[String]) -> Result<u32, AssembleError> {
    require_operands(&words[0], words, 4)?;
    let rd = reg(&words[1])?;
    let rs1 = reg(&words[2])?;
    let rs2 = reg(&words[3])?;
    let funct7 = u32::from(info.funct7);
    let funct3 = u32::from(info.funct3);
    let opcode = u32::from(info.opcode);
    Ok((funct7 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode)
}

fn encode_i(info: &InstrInfo, words: &[String]) -> Result<u32, AssembleError> {
    require_operands(&words[0], words, 4)?;
    let rd = reg(&words[1])?;
    // `lw rd, offset(base)` tokenizes as [lw, rd, offset, base]; the
    // immediate precedes the base register, unlike addi/jalr where the
    // source register precedes the immediate.
    let (rs1, imm) = if words[0] == "lw" {
        let imm = parse_imm(&words[2])?;
        let rs1 = reg(&words[3])?;
        (rs1, imm)
    } else {
        let rs1 = reg(&words[2])?;
        let imm = parse_imm(&words[3])?;
        (rs1, imm)
    };
    let imm_field = checked_imm_field(imm, 12)?;
    let funct3 = u32::from(info.funct3);
    let opcode = u32::from(info.opcode);
    Ok((imm_field << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode)
}

fn encode_s(info: &InstrInfo, words: &[String]) -> Result<u32, AssembleError> {
    require_operands(&words[0], words, 4)?;
    // `sw rs2, offset(base)` tokenizes as [sw, rs2, offset, base].
    let rs2 = reg(&words[1])?;
    let imm = parse_imm(&words[2])?;
    let rs1 = reg(&words[3])?;
    let imm_field = checked_imm_field(imm, 12)?;
    let imm11_5 = extract_field(imm_field, 11, 5);
    let imm4_0 = extract_field(imm_field, 4, 0);
    let funct3 = u32::from(info.funct3);
    let opcode = u32::from(info.opcode);
    Ok((imm11_5 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (imm4_0 << 7) | opcode)
}

fn encode_b(
    info: &InstrInfo,
    words: &[String],
    pc: u32,
    labels: &HashMap<String, u32>,
) -> Result<u32, AssembleError> {
    require_operands(&words[0], words, 4)?;
    let rs1 = reg(&words[1])?;
    let rs2 = reg(&words[2])?;
    let offset = resolve_branch_offset(&words[3], pc, labels)?;
    if offset % 2 != 0 {
        return Err(AssembleError::MisalignedBranch(offset));
    }
    // 13-bit two's-complement field: imm[12], imm[11], imm[10:5], imm[4:1], 0.
    let field = checked_imm_field(offset, 13)?;
    let imm12 = extract_field(field, 12, 12);
    let imm11 = extract_field(field, 11, 11);
    let imm10_5 = extract_field(field, 10, 5);
    let imm4_1 = extract_field(field, 4, 1);
    let funct3 = u32::from(info.funct3);
    let opcode = u32::from(info.opcode);
    Ok((imm12 << 31)
        | (imm10_5 << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (funct3 << 12)
        | (imm4_1 << 8)
        | (imm11 << 7)
        | opcode)
}

fn encode_j(
    info: &InstrInfo,
    words: &[String],
    pc: u32,
    labels: &HashMap<String, u32>,
) -> Result<u32, AssembleError> {
    require_operands(&words[0], words, 3)?;
    let rd = reg(&words[1])?;
    let offset = resolve_branch_offset(&words[2], pc, labels)?;
    if offset % 2 != 0 {
        return Err(AssembleError::MisalignedBranch(offset));
    }
    // The encoded immediate is the byte offset divided by two, truncated
    // to 20 bits, then permuted into imm[20|10:1|11|19:12].
    let halved = offset >> 1;
    if !imm_fits(halved, 20) {
        return Err(AssembleError::ImmediateOutOfRange {
            value: offset,
            bits: 20,
        });
    }
    let imm = (halved as u32) & mask(20);
    let imm20 = extract_field(imm, 19, 19);
    let imm10_1 = extract_field(imm, 18, 9);
    let imm11 = extract_field(imm, 8, 8);
    let imm19_12 = extract_field(imm, 7, 0);
    let field = (imm20 << 19) | (imm10_1 << 9) | (imm11 << 8) | imm19_12;
    let opcode = u32::from(info.opcode);
    Ok((field << 12) | (rd << 7) | opcode)
}

/// Encode one tokenized, label-stripped line at byte address `pc`.
/// `words[0]` is the mnemonic.
pub fn encode_line(
    words: &[String],
    pc: u32,
    labels: &HashMap<String, u32>,
) -> Result<u32, AssembleError> {
    let mnemonic = &words[0];
    let info = isa::lookup(mnemonic).ok_or_else(|| AssembleError::UnknownMnemonic(mnemonic.clone()))?;
    match info.format {
        Format::R => encode_r(&info, words),
        Format::I => encode_i(&info, words),
        Format::S => encode_s(&info, words),
        Format::B => encode_b(&info, words, pc, labels),
        Format::J => encode_j(&info, words, pc, labels),
    }
}
