pub mod instruction;
pub mod opcode;
pub mod operand;

pub use instruction::RawInstruction;
pub use opcode::{OpCode, OperandSlot};
pub use operand::{is_register, Bank, Operand, OperandKind, Register};
