//! Instruction Encoder
//!
//! Packs a validated instruction into a 4-bit opcode and a 28-bit operand
//! field. Registers take 4 bits, immediates 16 bits (two's complement);
//! operands are concatenated left to right and right-padded with zeros.

use std::fmt;

use crate::error::ValidationFailure;
use crate::isa::operand::Operand;
use crate::vm::word;

use super::validator::ValidatedInstruction;

/// Width of the operand field in bits
pub const OPERAND_FIELD_BITS: u32 = 28;

const REGISTER_BITS: u32 = 4;
const IMMEDIATE_BITS: u32 = 16;

/// A packed instruction as shown in the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedInstruction {
    pub opcode: u8,
    pub operands: u32,
}

impl EncodedInstruction {
    /// One hex digit, e.g. `0x1`
    pub fn opcode_hex(&self) -> String {
        format!("0x{:01x}", self.opcode)
    }

    /// Seven hex digits, e.g. `0x1000500`
    pub fn operand_hex(&self) -> String {
        format!("0x{:07x}", self.operands)
    }
}

impl fmt::Display for EncodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.opcode_hex(), self.operand_hex())
    }
}

pub fn encode(instruction: &ValidatedInstruction) -> Result<EncodedInstruction, ValidationFailure> {
    let mut field: u64 = 0;
    let mut bits: u32 = 0;

    for operand in &instruction.operands {
        let (value, width) = match operand {
            Operand::Register(register) => (register.flat_index() as u64, REGISTER_BITS),
            Operand::Immediate(value) => {
                (word::to_twos_complement(i64::from(*value)) as u64, IMMEDIATE_BITS)
            }
        };
        field = (field << width) | value;
        bits += width;
    }

    if bits > OPERAND_FIELD_BITS {
        return Err(ValidationFailure::OperandFieldOverflow { bits });
    }

    Ok(EncodedInstruction {
        opcode: instruction.opcode.bits(),
        operands: (field << (OPERAND_FIELD_BITS - bits)) as u32,
    })
}
