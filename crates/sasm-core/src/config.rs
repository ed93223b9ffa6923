//! SASM Configuration
//!
//! Defines execution options for a session.
//! Configuration specifies behaviour only; enforcement is handled by the machine.

/// How arithmetic handlers read an immediate third operand at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImmediateMode {
    /// Parse the whole literal (`100` reads as 100).
    #[default]
    Full,

    /// Read only the first character as a decimal digit (`100` reads as 1).
    FirstCharacter,
}

/// Session configuration
#[derive(Debug, Clone, Default)]
pub struct SasmConfig {
    /// Maximum number of executed instructions, unbounded when `None`
    pub step_limit: Option<u64>,

    /// Interpretation of immediates in `add`, `sub` and `mul`
    pub immediate_mode: ImmediateMode,
}

impl SasmConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn with_immediate_mode(mut self, mode: ImmediateMode) -> Self {
        self.immediate_mode = mode;
        self
    }
}
