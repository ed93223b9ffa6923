//! Assembler
//!
//! Decodes, validates and encodes every line of a program into the display
//! listing. The listing is never executed: the machine re-reads the raw lines.

pub mod encoder;
pub mod validator;

pub use encoder::{encode, EncodedInstruction, OPERAND_FIELD_BITS};
pub use validator::{ValidatedInstruction, Validator};

use tracing::debug;

use crate::error::{SasmResult, ValidationError};
use crate::isa::RawInstruction;

/// Assemble a whole program, failing on the first invalid line.
pub fn assemble<S: AsRef<str>>(lines: &[S]) -> SasmResult<Vec<EncodedInstruction>> {
    let validator = Validator::new(lines.len());
    let mut listing = Vec::with_capacity(lines.len());

    for (index, text) in lines.iter().enumerate() {
        let line = index + 1;
        let raw = RawInstruction::decode(text.as_ref())?;
        let validated = validator.validate(line, &raw)?;
        let encoded = encode(&validated).map_err(|reason| ValidationError {
            line,
            mnemonic: raw.mnemonic.clone(),
            expected: validated.opcode.formats(),
            operands: raw.operands.clone(),
            reason,
        })?;
        debug!(line, opcode = %validated.opcode, encoded = %encoded, "assembled instruction");
        listing.push(encoded);
    }

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SasmError, ValidationFailure};

    #[test]
    fn listing_has_one_entry_per_line() {
        let program = ["load R0, 3", "load R1, 3", "gotoeq R0, R1, 5", "load A0, 1", "system"];
        let listing = assemble(&program).unwrap();
        let rendered: Vec<String> = listing.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            rendered,
            [
                "(0x0, 0x1000300)",
                "(0x0, 0x2000300)",
                "(0x5, 0x1200050)",
                "(0x0, 0x0000100)",
                "(0x9, 0x0000000)",
            ]
        );
    }

    #[test]
    fn first_failure_stops_assembly() {
        let err = assemble(&["load R0, 1", "add R0, R1", "goto 99"]).unwrap_err();
        match err {
            SasmError::Validation(e) => {
                assert_eq!(e.line, 2);
                assert_eq!(e.mnemonic, "add");
                assert_eq!(e.reason, ValidationFailure::Arity { expected: 3, actual: 2 });
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_line_is_a_decode_error() {
        assert!(matches!(
            assemble(&["load R0, 1", ""]),
            Err(SasmError::Decode { .. })
        ));
    }
}
