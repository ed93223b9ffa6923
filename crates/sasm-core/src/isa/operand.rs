//! Operand Classification
//!
//! Classifies operand tokens and parses register references and immediates.
//! Classification is purely syntactic: a token is a register reference iff it
//! starts with a bank tag.

use std::fmt;

use crate::error::ValidationFailure;

/// Smallest immediate that fits in 16 bits
pub const IMMEDIATE_MIN: i64 = -32768;

/// Largest immediate that fits in 16 bits
pub const IMMEDIATE_MAX: i64 = 32767;

/// Number of addressable register slots
pub const REGISTER_COUNT: usize = 9;

/// Register bank tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    /// `A`: the single accumulator slot
    Accumulator,
    /// `R`: eight general-purpose slots
    General,
}

impl Bank {
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'A' => Some(Bank::Accumulator),
            'R' => Some(Bank::General),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Bank::Accumulator => 'A',
            Bank::General => 'R',
        }
    }

    /// First flat index of the bank
    fn base(self) -> usize {
        match self {
            Bank::Accumulator => 0,
            Bank::General => 1,
        }
    }

    fn size(self) -> usize {
        match self {
            Bank::Accumulator => 1,
            Bank::General => 8,
        }
    }
}

/// A resolved register reference such as `R3`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    pub bank: Bank,
    pub index: usize,
}

impl Register {
    pub const ACCUMULATOR: Register = Register { bank: Bank::Accumulator, index: 0 };

    /// Parse a register token; the index must exist in its bank.
    pub fn parse(token: &str) -> Result<Self, ValidationFailure> {
        let invalid = || ValidationFailure::InvalidRegister(token.to_string());

        let mut chars = token.chars();
        let bank = chars.next().and_then(Bank::from_tag).ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: usize = digits.parse().map_err(|_| invalid())?;
        if index >= bank.size() {
            return Err(invalid());
        }
        Ok(Register { bank, index })
    }

    /// Flat storage index: `A0 -> 0`, `R<i> -> i + 1`
    pub fn flat_index(self) -> usize {
        self.bank.base() + self.index
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.bank.tag(), self.index)
    }
}

/// Operand category used in validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    Register,
    Immediate,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandKind::Register => f.write_str("a register"),
            OperandKind::Immediate => f.write_str("an integer"),
        }
    }
}

/// A classified and parsed operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Immediate(i16),
}

impl Operand {
    /// Classify and parse a token, range-checking immediates.
    pub fn parse(token: &str) -> Result<Self, ValidationFailure> {
        if is_register(token) {
            Register::parse(token).map(Operand::Register)
        } else {
            let value = parse_immediate(token)?;
            check_immediate_range(value).map(Operand::Immediate)
        }
    }

    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Register(_) => OperandKind::Register,
            Operand::Immediate(_) => OperandKind::Immediate,
        }
    }
}

/// True iff the token is non-empty and starts with a bank tag
pub fn is_register(token: &str) -> bool {
    token.chars().next().and_then(Bank::from_tag).is_some()
}

/// Parse an integer literal without range checking; empty text reads as 0.
pub fn parse_immediate(token: &str) -> Result<i64, ValidationFailure> {
    if token.is_empty() {
        return Ok(0);
    }
    token
        .parse::<i64>()
        .map_err(|_| ValidationFailure::InvalidImmediate(token.to_string()))
}

pub fn check_immediate_range(value: i64) -> Result<i16, ValidationFailure> {
    i16::try_from(value).map_err(|_| ValidationFailure::ImmediateOutOfRange(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_looks_at_first_character_only() {
        assert!(is_register("A0"));
        assert!(is_register("R7"));
        assert!(is_register("Rx"));
        assert!(!is_register(""));
        assert!(!is_register("r0"));
        assert!(!is_register("-5"));
        assert!(!is_register("100"));
    }

    #[test]
    fn registers_resolve_to_flat_indices() {
        assert_eq!(Register::parse("A0").unwrap().flat_index(), 0);
        assert_eq!(Register::parse("R0").unwrap().flat_index(), 1);
        assert_eq!(Register::parse("R7").unwrap().flat_index(), 8);
    }

    #[test]
    fn registers_outside_their_bank_are_rejected() {
        for token in ["A1", "R8", "R10", "R", "Rx", "R-1", "R+1"] {
            assert_eq!(
                Register::parse(token),
                Err(ValidationFailure::InvalidRegister(token.to_string())),
                "{token}"
            );
        }
    }

    #[test]
    fn empty_immediate_reads_as_zero() {
        assert_eq!(Operand::parse(""), Ok(Operand::Immediate(0)));
    }

    #[test]
    fn immediate_range_is_sixteen_bits() {
        assert_eq!(Operand::parse("32767"), Ok(Operand::Immediate(32767)));
        assert_eq!(Operand::parse("-32768"), Ok(Operand::Immediate(-32768)));
        assert_eq!(
            Operand::parse("40000"),
            Err(ValidationFailure::ImmediateOutOfRange(40000))
        );
        assert_eq!(
            Operand::parse("five"),
            Err(ValidationFailure::InvalidImmediate("five".into()))
        );
    }
}
