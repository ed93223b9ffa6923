//! SASM Error Types
//!
//! Defines all error conditions produced while assembling or executing a program.
//! Every failure is detected eagerly; nothing here is retried or recovered.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::isa::operand::OperandKind;

#[derive(Debug, Error)]
pub enum SasmError {
    // Decoding errors
    #[error("cannot isolate a mnemonic in line {line:?}")]
    Decode { line: String },

    // Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Execution errors
    #[error("invalid register word {0:?}")]
    InvalidWord(String),
    #[error("you must assemble before execution")]
    Precondition,
    #[error("step limit of {limit} instructions exceeded")]
    StepLimitExceeded { limit: u64 },

    // IO boundary
    #[error("io error: {0}")]
    Io(String),
}

impl From<io::Error> for SasmError {
    fn from(err: io::Error) -> Self {
        SasmError::Io(err.to_string())
    }
}

pub type SasmResult<T> = Result<T, SasmError>;

/// A single instruction that failed its opcode contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: incorrect values for instruction {mnemonic} ({reason}). Use formats {}", .expected.join(" | "))]
pub struct ValidationError {
    /// 1-based position of the instruction in the program.
    pub line: usize,
    pub mnemonic: String,
    /// Format examples of the opcode, empty for unknown mnemonics.
    pub expected: &'static [&'static str],
    /// Operand tokens as written.
    pub operands: Vec<String>,
    pub reason: ValidationFailure,
}

/// The rule an instruction broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    UnknownMnemonic,
    Arity { expected: usize, actual: usize },
    OperandKind { position: usize, expected: OperandKind },
    InvalidRegister(String),
    InvalidImmediate(String),
    ImmediateOutOfRange(i64),
    JumpTargetOutOfRange { target: i64, program_len: usize },
    OperandFieldOverflow { bits: u32 },
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::UnknownMnemonic =>
                write!(f, "unknown mnemonic"),
            ValidationFailure::Arity { expected, actual } =>
                write!(f, "expected {} operands, got {}", expected, actual),
            ValidationFailure::OperandKind { position, expected } =>
                write!(f, "operand {} must be {}", position, expected),
            ValidationFailure::InvalidRegister(token) =>
                write!(f, "invalid register {:?}", token),
            ValidationFailure::InvalidImmediate(token) =>
                write!(f, "invalid integer {:?}", token),
            ValidationFailure::ImmediateOutOfRange(value) =>
                write!(f, "integer {} must be between -32768 and 32767", value),
            ValidationFailure::JumpTargetOutOfRange { target, program_len } =>
                write!(f, "jump target {} must be between 1 and {}", target, program_len),
            ValidationFailure::OperandFieldOverflow { bits } =>
                write!(f, "operands need {} bits, at most 28 fit", bits),
        }
    }
}
