//! Simple Assembler - Core Library
//!
//! Public API surface for the SASM core: a ten-opcode instruction set, an
//! encoder producing a hex listing, and an interpreter that executes the
//! mnemonic program against nine 16-bit registers.
//!
//! Encoding and execution are two independent passes over the same source
//! lines. The listing is for display only; the machine re-decodes and
//! re-validates every raw line when it runs it.

pub mod error;
pub mod config;
pub mod isa;
pub mod assembler;
pub mod vm;
pub mod host;

// Re-export commonly used types
pub use error::{SasmError, SasmResult, ValidationError, ValidationFailure};
pub use config::{ImmediateMode, SasmConfig};
pub use isa::opcode::OpCode;
pub use assembler::EncodedInstruction;
pub use vm::machine::Machine;
pub use vm::registers::RegisterFile;
pub use host::SystemOutput;

#[cfg(test)]
mod tests {
	use super::*;
	use crate::isa::Register;

	fn reg(token: &str) -> Register {
		Register::parse(token).expect("register")
	}

	fn run(machine: &mut Machine, program: &[&str]) -> Vec<i16> {
		machine.assemble(program.iter().copied()).expect("assembly failed");
		let mut out: Vec<i16> = Vec::new();
		machine.execute(&mut out).expect("execution failed");
		out
	}

	#[test]
	fn execute_before_assemble_is_refused() {
		let mut machine = Machine::new(SasmConfig::new());
		let mut out: Vec<i16> = Vec::new();
		assert!(matches!(machine.execute(&mut out), Err(SasmError::Precondition)));
	}

	#[test]
	fn failed_assembly_discards_previous_listing() {
		let mut machine = Machine::new(SasmConfig::new());
		machine.assemble(["load R0, 1"]).expect("assembly failed");
		assert!(machine.assemble(["load R0, 40000"]).is_err());
		assert!(machine.listing().is_none());
		let mut out: Vec<i16> = Vec::new();
		assert!(matches!(machine.execute(&mut out), Err(SasmError::Precondition)));
	}

	#[test]
	fn addition_wraps_to_sixteen_bits() {
		let mut machine = Machine::new(SasmConfig::new());
		run(&mut machine, &["load R0, 32767", "load R1, 1", "add R0, R0, R1"]);
		assert_eq!(machine.registers().get_signed(reg("R0")), -32768);
		assert_eq!(machine.registers().get_hex(reg("R0")), "0x8000");
	}

	#[test]
	fn subtraction_and_multiplication_wrap() {
		let mut machine = Machine::new(SasmConfig::new());
		run(&mut machine, &[
			"load R0, -32768",
			"sub R1, R0, 1",
			"load R2, 300",
			"mul R3, R2, R2",
		]);
		assert_eq!(machine.registers().get_signed(reg("R1")), 32767);
		assert_eq!(machine.registers().get_signed(reg("R3")), (90000 - 65536) as i16);
	}

	#[test]
	fn system_prints_nonzero_accumulator_only() {
		let mut machine = Machine::new(SasmConfig::new());
		let out = run(&mut machine, &["system", "load A0, -7", "system", "load A0, 0", "system"]);
		assert_eq!(out, vec![-7]);
	}

	#[test]
	fn mv_copies_raw_word() {
		let mut machine = Machine::new(SasmConfig::new());
		run(&mut machine, &["load R0, -2", "mv A0, R0"]);
		assert_eq!(machine.registers().read(Register::ACCUMULATOR), 0xfffe);
		assert_eq!(machine.registers().get_hex(Register::ACCUMULATOR), "0xfffe");
	}

	#[test]
	fn backward_branch_loops_until_condition_fails() {
		// A0 counts down from 3, printing each value.
		let program = [
			"load A0, 3",
			"load R0, 0",
			"system",
			"sub A0, A0, 1",
			"gotogt A0, R0, 3",
		];
		let mut machine = Machine::new(SasmConfig::new());
		assert_eq!(run(&mut machine, &program), vec![3, 2, 1]);
		assert_eq!(machine.pc(), program.len());
	}

	#[test]
	fn goto_to_own_line_falls_through() {
		let mut machine = Machine::new(SasmConfig::new());
		let out = run(&mut machine, &["load A0, 4", "goto 2", "system"]);
		assert_eq!(out, vec![4]);
	}

	#[test]
	fn registers_survive_reassembly() {
		let mut machine = Machine::new(SasmConfig::new());
		run(&mut machine, &["load R5, 12"]);
		let out = run(&mut machine, &["mv A0, R5", "system"]);
		assert_eq!(out, vec![12]);
		machine.reset_registers();
		assert_eq!(machine.registers().get_signed(reg("R5")), 0);
	}

	#[test]
	fn rerun_without_reassembly_executes_nothing() {
		let mut machine = Machine::new(SasmConfig::new());
		run(&mut machine, &["load A0, 1", "system"]);
		let mut out: Vec<i16> = Vec::new();
		assert_eq!(machine.execute(&mut out).expect("execution failed"), 0);
		assert!(out.is_empty());
	}

	#[test]
	fn full_immediates_are_read_whole() {
		let mut machine = Machine::new(SasmConfig::new());
		run(&mut machine, &["load R2, 1", "add R1, R2, 100"]);
		assert_eq!(machine.registers().get_signed(reg("R1")), 101);
	}

	#[test]
	fn legacy_immediates_read_first_digit() {
		let config = SasmConfig::new().with_immediate_mode(ImmediateMode::FirstCharacter);
		let mut machine = Machine::new(config);
		run(&mut machine, &["load R2, 1", "add R1, R2, 100", "mul R3, R2, 42"]);
		assert_eq!(machine.registers().get_signed(reg("R1")), 2);
		assert_eq!(machine.registers().get_signed(reg("R3")), 4);
	}

	#[test]
	fn legacy_immediates_reject_signed_literals() {
		let config = SasmConfig::new().with_immediate_mode(ImmediateMode::FirstCharacter);
		let mut machine = Machine::new(config);
		machine.assemble(["sub R1, R2, -3"]).expect("assembly failed");
		let mut out: Vec<i16> = Vec::new();
		match machine.execute(&mut out) {
			Err(SasmError::Validation(e)) => {
				assert_eq!(e.line, 1);
				assert_eq!(e.reason, ValidationFailure::InvalidImmediate("-3".into()));
			}
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[test]
	fn step_limit_stops_infinite_loops() {
		let mut machine = Machine::new(SasmConfig::new().with_step_limit(50));
		machine.assemble(["load R0, 1", "goto 1"]).expect("assembly failed");
		let mut out: Vec<i16> = Vec::new();
		assert!(matches!(
			machine.execute(&mut out),
			Err(SasmError::StepLimitExceeded { limit: 50 })
		));
	}
}
