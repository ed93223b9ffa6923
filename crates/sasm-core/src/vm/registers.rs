//! Register File
//!
//! Nine 16-bit cells addressed as `A0` and `R0..R7`. Cells hold raw words;
//! signed and hex views are conversions at the edges.

use crate::error::{SasmError, SasmResult};
use crate::isa::operand::{Register, REGISTER_COUNT};

use super::word;

/// Flat-indexed register storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    cells: [u16; REGISTER_COUNT],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw word stored in a register
    pub fn read(&self, register: Register) -> u16 {
        self.cells[register.flat_index()]
    }

    pub fn write(&mut self, register: Register, value: u16) {
        self.cells[register.flat_index()] = value;
    }

    /// Raw word by flat index (`A0` is 0, `R<i>` is `i + 1`)
    pub fn word(&self, index: usize) -> Option<u16> {
        self.cells.get(index).copied()
    }

    pub fn get_signed(&self, register: Register) -> i16 {
        word::from_twos_complement(self.read(register))
    }

    /// Store any integer, wrapping it to 16 bits
    pub fn set_signed(&mut self, register: Register, value: i64) {
        self.write(register, word::to_twos_complement(value));
    }

    pub fn get_hex(&self, register: Register) -> String {
        word::to_hex(self.read(register))
    }

    pub fn set_hex(&mut self, register: Register, text: &str) -> SasmResult<()> {
        let value = word::from_hex(text).ok_or_else(|| SasmError::InvalidWord(text.to_string()))?;
        self.write(register, value);
        Ok(())
    }

    /// `(name, hex)` pairs in the order `A0, R0..R7`
    pub fn dump(&self) -> Vec<(String, String)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let name = match index {
                    0 => "A0".to_string(),
                    i => format!("R{}", i - 1),
                };
                (name, word::to_hex(*cell))
            })
            .collect()
    }
}
