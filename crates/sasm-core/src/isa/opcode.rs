//! Opcode Definitions
//!
//! Defines the ten-opcode instruction set: mnemonic, 4-bit pattern,
//! format examples and operand contract of each opcode.
//! Opcode values are an eternal contract.

use std::fmt;

/// What an operand position accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSlot {
    /// Register reference only
    Register,
    /// Immediate only
    Immediate,
    /// Immediate naming a 1-based line of the program
    JumpTarget,
    /// Register reference or immediate
    Value,
}

/// Instruction opcodes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    // Data
    Load = 0b0000,

    // Arithmetic
    Add = 0b0001,
    Sub = 0b0010,
    Mul = 0b0011,

    // Control flow
    Goto   = 0b0100,
    GotoEq = 0b0101,
    GotoLt = 0b0110,
    GotoGt = 0b0111,

    // Register transfer
    Mv = 0b1000,

    // System
    System = 0b1001,
}

impl OpCode {
    pub const ALL: [OpCode; 10] = [
        OpCode::Load,
        OpCode::Add,
        OpCode::Sub,
        OpCode::Mul,
        OpCode::Goto,
        OpCode::GotoEq,
        OpCode::GotoLt,
        OpCode::GotoGt,
        OpCode::Mv,
        OpCode::System,
    ];

    /// Look up an opcode by its mnemonic
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        match mnemonic {
            "load" => Some(OpCode::Load),
            "add" => Some(OpCode::Add),
            "sub" => Some(OpCode::Sub),
            "mul" => Some(OpCode::Mul),
            "goto" => Some(OpCode::Goto),
            "gotoeq" => Some(OpCode::GotoEq),
            "gotolt" => Some(OpCode::GotoLt),
            "gotogt" => Some(OpCode::GotoGt),
            "mv" => Some(OpCode::Mv),
            "system" => Some(OpCode::System),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Load => "load",
            OpCode::Add => "add",
            OpCode::Sub => "sub",
            OpCode::Mul => "mul",
            OpCode::Goto => "goto",
            OpCode::GotoEq => "gotoeq",
            OpCode::GotoLt => "gotolt",
            OpCode::GotoGt => "gotogt",
            OpCode::Mv => "mv",
            OpCode::System => "system",
        }
    }

    /// 4-bit opcode pattern
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Format examples reported with validation errors
    pub fn formats(self) -> &'static [&'static str] {
        match self {
            OpCode::Load => &["load R0, 5"],
            OpCode::Add => &["add R1, R2, 100", "add R1, R2, R0"],
            OpCode::Sub => &["sub R0, R1, 20", "sub R0, R2, R1"],
            OpCode::Mul => &["mul R3, R2, 4", "mul R3, R2, R1"],
            OpCode::Goto => &["goto 3"],
            OpCode::GotoEq => &["gotoeq R1, R0, 4"],
            OpCode::GotoLt => &["gotolt R1, R2, 5"],
            OpCode::GotoGt => &["gotogt R2, R3, 12"],
            OpCode::Mv => &["mv A0, R1"],
            OpCode::System => &["system"],
        }
    }

    /// Operand contract, one slot per expected operand
    pub fn operand_slots(self) -> &'static [OperandSlot] {
        use OperandSlot::*;
        match self {
            OpCode::Load => &[Register, Immediate],
            OpCode::Add | OpCode::Sub | OpCode::Mul => &[Register, Register, Value],
            OpCode::Goto => &[JumpTarget],
            OpCode::GotoEq | OpCode::GotoLt | OpCode::GotoGt => &[Register, Register, JumpTarget],
            OpCode::Mv => &[Register, Register],
            OpCode::System => &[],
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
