pub mod machine;
pub mod registers;
pub mod word;

pub use machine::Machine;
pub use registers::RegisterFile;
