//! Instruction Validator
//!
//! Applies the per-opcode operand contract in a fixed order: arity, operand
//! kind per position, jump-target range, then register and immediate parsing.

use crate::error::{ValidationError, ValidationFailure};
use crate::isa::opcode::{OpCode, OperandSlot};
use crate::isa::operand::{self, Operand, OperandKind};
use crate::isa::RawInstruction;

/// An instruction that satisfied its opcode contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInstruction {
    pub opcode: OpCode,
    pub operands: Vec<Operand>,
}

/// Validates instructions against a program of known length
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    program_len: usize,
}

impl Validator {
    pub fn new(program_len: usize) -> Self {
        Validator { program_len }
    }

    /// Validate the instruction found at 1-based `line`.
    pub fn validate(
        &self,
        line: usize,
        raw: &RawInstruction,
    ) -> Result<ValidatedInstruction, ValidationError> {
        let fail = |opcode: Option<OpCode>, reason: ValidationFailure| ValidationError {
            line,
            mnemonic: raw.mnemonic.clone(),
            expected: opcode.map(OpCode::formats).unwrap_or(&[]),
            operands: raw.operands.clone(),
            reason,
        };

        let opcode = OpCode::from_mnemonic(&raw.mnemonic)
            .ok_or_else(|| fail(None, ValidationFailure::UnknownMnemonic))?;
        let slots = opcode.operand_slots();

        if raw.operands.len() != slots.len() {
            return Err(fail(
                Some(opcode),
                ValidationFailure::Arity { expected: slots.len(), actual: raw.operands.len() },
            ));
        }

        for (position, (slot, token)) in slots.iter().zip(&raw.operands).enumerate() {
            let register = operand::is_register(token);
            let expected = match slot {
                OperandSlot::Register if !register => Some(OperandKind::Register),
                OperandSlot::Immediate | OperandSlot::JumpTarget if register => {
                    Some(OperandKind::Immediate)
                }
                _ => None,
            };
            if let Some(expected) = expected {
                return Err(fail(
                    Some(opcode),
                    ValidationFailure::OperandKind { position, expected },
                ));
            }
        }

        for (slot, token) in slots.iter().zip(&raw.operands) {
            if *slot == OperandSlot::JumpTarget {
                let target = operand::parse_immediate(token).map_err(|f| fail(Some(opcode), f))?;
                if target < 1 || target > self.program_len as i64 {
                    return Err(fail(
                        Some(opcode),
                        ValidationFailure::JumpTargetOutOfRange {
                            target,
                            program_len: self.program_len,
                        },
                    ));
                }
            }
        }

        let operands = raw
            .operands
            .iter()
            .map(|token| Operand::parse(token))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|f| fail(Some(opcode), f))?;

        Ok(ValidatedInstruction { opcode, operands })
    }
}
