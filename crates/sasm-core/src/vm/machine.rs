//! Execution Engine
//!
//! Owns one program session: raw lines, the display listing, the register
//! file and the program counter. Execution walks the raw lines, re-decoding
//! and re-validating each one before dispatching on its opcode; the listing
//! produced by `assemble` only gates execution and is never read by it.

use tracing::{info, trace};

use crate::assembler::{self, EncodedInstruction, Validator};
use crate::config::{ImmediateMode, SasmConfig};
use crate::error::{SasmError, SasmResult, ValidationError, ValidationFailure};
use crate::host::SystemOutput;
use crate::isa::operand::{self, Register};
use crate::isa::{OpCode, RawInstruction};

use super::registers::RegisterFile;

/// Assembler and interpreter session
#[derive(Debug, Clone, Default)]
pub struct Machine {
    config: SasmConfig,
    raw: Vec<String>,
    listing: Option<Vec<EncodedInstruction>>,
    registers: RegisterFile,
    pc: usize,
}

impl Machine {
    /// Create a session with zeroed registers and no program
    pub fn new(config: SasmConfig) -> Self {
        Machine {
            config,
            ..Self::default()
        }
    }

    /// Load and assemble a program, rewinding the program counter.
    ///
    /// Registers keep their values across programs. On failure the previous
    /// listing is discarded, so `execute` refuses to run.
    pub fn assemble<I, S>(&mut self, lines: I) -> SasmResult<&[EncodedInstruction]>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw = lines.into_iter().map(Into::into).collect();
        self.pc = 0;
        self.listing = None;

        let listing = assembler::assemble(&self.raw)?;
        info!(instructions = listing.len(), "program assembled");
        Ok(self.listing.insert(listing).as_slice())
    }

    /// Run from the current program counter until it leaves the program.
    ///
    /// Returns the number of executed instructions.
    pub fn execute(&mut self, out: &mut dyn SystemOutput) -> SasmResult<u64> {
        if !self.is_assembled() {
            return Err(SasmError::Precondition);
        }

        info!(pc = self.pc, "execution started");
        let mut steps: u64 = 0;
        while self.pc < self.raw.len() {
            if let Some(limit) = self.config.step_limit {
                if steps >= limit {
                    return Err(SasmError::StepLimitExceeded { limit });
                }
            }
            self.step(out)?;
            steps += 1;
        }
        info!(steps, "execution finished");
        Ok(steps)
    }

    /// Execute the instruction at the program counter.
    fn step(&mut self, out: &mut dyn SystemOutput) -> SasmResult<()> {
        let line = self.pc + 1;
        let raw = RawInstruction::decode(&self.raw[self.pc])?;
        let opcode = Validator::new(self.raw.len()).validate(line, &raw)?.opcode;
        trace!(pc = self.pc, %opcode, operands = ?raw.operands, "step");

        let args = Args { line, opcode, raw: &raw };
        let before = self.pc;

        match opcode {
            OpCode::Load => self.load(&args)?,
            OpCode::Add => self.arithmetic(&args, |a, b| a + b)?,
            OpCode::Sub => self.arithmetic(&args, |a, b| a - b)?,
            OpCode::Mul => self.arithmetic(&args, |a, b| a * b)?,
            OpCode::Goto => self.goto(&args)?,
            OpCode::GotoEq => self.branch(&args, |a, b| a == b)?,
            OpCode::GotoLt => self.branch(&args, |a, b| a < b)?,
            OpCode::GotoGt => self.branch(&args, |a, b| a > b)?,
            OpCode::Mv => self.mv(&args)?,
            OpCode::System => self.system(out)?,
        }

        if self.pc == before {
            self.pc += 1;
        }
        Ok(())
    }

    fn load(&mut self, args: &Args<'_>) -> SasmResult<()> {
        let dst = args.register(0)?;
        let value = args.integer(1)?;
        self.registers.set_signed(dst, value);
        Ok(())
    }

    fn arithmetic(&mut self, args: &Args<'_>, combine: fn(i64, i64) -> i64) -> SasmResult<()> {
        let dst = args.register(0)?;
        let a = i64::from(self.registers.get_signed(args.register(1)?));
        let b = self.value(args, 2)?;
        self.registers.set_signed(dst, combine(a, b));
        Ok(())
    }

    fn goto(&mut self, args: &Args<'_>) -> SasmResult<()> {
        self.pc = args.target(0)?;
        Ok(())
    }

    fn branch(&mut self, args: &Args<'_>, taken: fn(i16, i16) -> bool) -> SasmResult<()> {
        let a = self.registers.get_signed(args.register(0)?);
        let b = self.registers.get_signed(args.register(1)?);
        let target = args.target(2)?;
        if taken(a, b) {
            self.pc = target;
        }
        Ok(())
    }

    fn mv(&mut self, args: &Args<'_>) -> SasmResult<()> {
        let dst = args.register(0)?;
        let src = args.register(1)?;
        self.registers.write(dst, self.registers.read(src));
        Ok(())
    }

    fn system(&mut self, out: &mut dyn SystemOutput) -> SasmResult<()> {
        let value = self.registers.get_signed(Register::ACCUMULATOR);
        if value != 0 {
            out.emit(value)?;
        }
        Ok(())
    }

    /// Third arithmetic operand: a register's signed value or an immediate
    fn value(&self, args: &Args<'_>, position: usize) -> SasmResult<i64> {
        let token = args.token(position);
        if operand::is_register(token) {
            return Ok(i64::from(self.registers.get_signed(args.register(position)?)));
        }
        match self.config.immediate_mode {
            ImmediateMode::Full => args.integer(position),
            ImmediateMode::FirstCharacter => token
                .chars()
                .next()
                .and_then(|c| c.to_digit(10))
                .map(i64::from)
                .ok_or_else(|| args.fail(ValidationFailure::InvalidImmediate(token.to_string()))),
        }
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    /// Zero every register
    pub fn reset_registers(&mut self) {
        self.registers = RegisterFile::new();
    }

    /// Encoded listing of the last successful `assemble`
    pub fn listing(&self) -> Option<&[EncodedInstruction]> {
        self.listing.as_deref()
    }

    pub fn program(&self) -> &[String] {
        &self.raw
    }

    pub fn program_len(&self) -> usize {
        self.raw.len()
    }

    /// 0-based index of the next instruction
    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn is_assembled(&self) -> bool {
        self.listing
            .as_ref()
            .is_some_and(|listing| listing.len() == self.raw.len())
    }
}

/// Raw operand tokens of the instruction being executed
struct Args<'a> {
    line: usize,
    opcode: OpCode,
    raw: &'a RawInstruction,
}

impl Args<'_> {
    fn token(&self, position: usize) -> &str {
        self.raw.operands.get(position).map(String::as_str).unwrap_or("")
    }

    fn register(&self, position: usize) -> SasmResult<Register> {
        Register::parse(self.token(position)).map_err(|reason| self.fail(reason))
    }

    fn integer(&self, position: usize) -> SasmResult<i64> {
        operand::parse_immediate(self.token(position)).map_err(|reason| self.fail(reason))
    }

    /// 0-based index of a 1-based jump target
    fn target(&self, position: usize) -> SasmResult<usize> {
        let line = self.integer(position)?;
        usize::try_from(line - 1).map_err(|_| {
            self.fail(ValidationFailure::JumpTargetOutOfRange { target: line, program_len: 0 })
        })
    }

    fn fail(&self, reason: ValidationFailure) -> SasmError {
        SasmError::Validation(ValidationError {
            line: self.line,
            mnemonic: self.raw.mnemonic.clone(),
            expected: self.opcode.formats(),
            operands: self.raw.operands.clone(),
            reason,
        })
    }
}
