//! Host integration for the `system` opcode
//!
//! The machine hands the accumulator value to a host-provided sink. This
//! module contains no policy: the machine already decides when to call it.

use std::io;

/// Receives values printed by `system`.
pub trait SystemOutput {
    fn emit(&mut self, value: i16) -> io::Result<()>;
}

/// Captures values in memory.
impl SystemOutput for Vec<i16> {
    fn emit(&mut self, value: i16) -> io::Result<()> {
        self.push(value);
        Ok(())
    }
}
