//! Listing and register rendering.

use std::fmt::Write;

use sasm_core::{EncodedInstruction, RegisterFile};

pub fn listing(listing: &[EncodedInstruction]) -> String {
    let mut out = format!("{:>6}{:>10}\n", "Opcode", "Values");
    for encoded in listing {
        let _ = writeln!(out, "{:>3}{:>16}", encoded.opcode_hex(), encoded.operand_hex());
    }
    out
}

pub fn registers(registers: &RegisterFile) -> String {
    let mut out = format!("\n{:>8}{:>8}\n", "Register", "Value");
    for (name, hex) in registers.dump() {
        let _ = writeln!(out, "{:>2}{:>15}", name, hex);
    }
    out.push('\n');
    out
}
