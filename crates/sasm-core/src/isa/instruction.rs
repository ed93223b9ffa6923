//! Raw Instruction Representation
//!
//! Splits one program line into a mnemonic and its operand tokens.
//! This layer performs no semantic validation.

use crate::error::{SasmError, SasmResult};

/// One instruction as written by the program author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInstruction {
    pub mnemonic: String,
    pub operands: Vec<String>,
}

impl RawInstruction {
    /// Decode a line of the form `mnemonic op1, op2, ...`
    pub fn decode(line: &str) -> SasmResult<Self> {
        let line = line.trim();
        let (mnemonic, rest) = match line.split_once(char::is_whitespace) {
            Some((mnemonic, rest)) => (mnemonic, rest.trim()),
            None => (line, ""),
        };

        if mnemonic.is_empty() {
            return Err(SasmError::Decode { line: line.to_string() });
        }

        let operands = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split(',').map(|token| token.trim().to_string()).collect()
        };

        Ok(RawInstruction {
            mnemonic: mnemonic.to_string(),
            operands,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_mnemonic_and_trimmed_operands() {
        let raw = RawInstruction::decode("add R1,  R2 ,100  \n").unwrap();
        assert_eq!(raw.mnemonic, "add");
        assert_eq!(raw.operands, vec!["R1", "R2", "100"]);
    }

    #[test]
    fn bare_mnemonic_has_no_operands() {
        let raw = RawInstruction::decode("system\n").unwrap();
        assert_eq!(raw.mnemonic, "system");
        assert!(raw.operands.is_empty());
    }

    #[test]
    fn trailing_comma_yields_empty_token() {
        let raw = RawInstruction::decode("add R0, R1,").unwrap();
        assert_eq!(raw.operands, vec!["R0", "R1", ""]);
    }

    #[test]
    fn blank_line_cannot_be_decoded() {
        assert!(matches!(
            RawInstruction::decode("   "),
            Err(SasmError::Decode { .. })
        ));
    }
}
